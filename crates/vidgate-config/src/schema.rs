//! Raw settings schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw settings as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSettings {
    /// Settings schema version
    pub settings_version: u32,

    /// Daily viewing budget in minutes. Required; there is no default.
    pub daily_limit_minutes: Option<u32>,

    /// Number of videos per grid request
    pub grid_size: Option<u32>,

    /// Service-level paths
    #[serde(default)]
    pub service: RawServiceConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Data directory for the store
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_settings() {
        let toml_str = r#"
            settings_version = 1
            daily_limit_minutes = 60
            grid_size = 12

            [service]
            data_dir = "/var/lib/vidgate"
        "#;

        let raw: RawSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(raw.daily_limit_minutes, Some(60));
        assert_eq!(raw.grid_size, Some(12));
        assert_eq!(
            raw.service.data_dir,
            Some(PathBuf::from("/var/lib/vidgate"))
        );
    }

    #[test]
    fn service_section_is_optional() {
        let toml_str = r#"
            settings_version = 1
            daily_limit_minutes = 30
        "#;

        let raw: RawSettings = toml::from_str(toml_str).unwrap();
        assert!(raw.service.data_dir.is_none());
    }
}
