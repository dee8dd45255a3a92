//! Default paths for vidgate components
//!
//! Paths are user-writable by default (no root required):
//! - Config: `$XDG_CONFIG_HOME/vidgate/settings.toml` or `~/.config/vidgate/settings.toml`
//! - Data: `$XDG_DATA_HOME/vidgate` or `~/.local/share/vidgate`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const VIDGATE_DATA_DIR_ENV: &str = "VIDGATE_DATA_DIR";

/// Application subdirectory name
const APP_DIR: &str = "vidgate";

/// Settings filename within the config directory
const SETTINGS_FILENAME: &str = "settings.toml";

/// Get the default settings file path.
///
/// Order of precedence:
/// 1. `$XDG_CONFIG_HOME/vidgate/settings.toml` (if XDG_CONFIG_HOME is set)
/// 2. `~/.config/vidgate/settings.toml` (fallback)
pub fn default_settings_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(SETTINGS_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(SETTINGS_FILENAME);
    }

    PathBuf::from("/tmp").join(APP_DIR).join(SETTINGS_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$VIDGATE_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/vidgate` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/vidgate` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(VIDGATE_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking the env var.
/// Used for default values in settings where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_path_contains_vidgate() {
        let path = default_settings_path();
        assert!(path.to_string_lossy().contains("vidgate"));
        assert!(path.to_string_lossy().ends_with("settings.toml"));
    }

    #[test]
    fn data_dir_contains_vidgate() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("vidgate"));
    }
}
