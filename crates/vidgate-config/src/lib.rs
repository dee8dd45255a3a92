//! Settings parsing and validation for vidgate
//!
//! Supports TOML settings with:
//! - Versioned schema
//! - A required daily viewing limit and grid size, range-checked
//! - Validation with clear error messages
//!
//! A missing or out-of-range daily limit is a hard error. There is no
//! "unlimited" fallback anywhere in this crate: silently treating a broken
//! settings file as no limit would defeat the product's core guarantee.

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate settings from a TOML file
pub fn load_settings(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parse and validate settings from a TOML string
pub fn parse_settings(content: &str) -> ConfigResult<Settings> {
    let raw: RawSettings = toml::from_str(content)?;

    if raw.settings_version != CURRENT_SETTINGS_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.settings_version));
    }

    let errors = validate_settings(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

/// Current supported settings version
pub const CURRENT_SETTINGS_VERSION: u32 = 1;
