//! Settings validation

use crate::schema::RawSettings;
use crate::settings::{DAILY_LIMIT_RANGE, GRID_SIZE_RANGE};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("daily_limit_minutes is required")]
    MissingDailyLimit,

    #[error("daily_limit_minutes must be {min}-{max}, got {value}")]
    DailyLimitOutOfRange { value: u32, min: u32, max: u32 },

    #[error("grid_size must be {min}-{max}, got {value}")]
    GridSizeOutOfRange { value: u32, min: u32, max: u32 },
}

/// Validate raw settings
pub fn validate_settings(raw: &RawSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match raw.daily_limit_minutes {
        None => errors.push(ValidationError::MissingDailyLimit),
        Some(value) => {
            if !DAILY_LIMIT_RANGE.contains(&value) {
                errors.push(ValidationError::DailyLimitOutOfRange {
                    value,
                    min: *DAILY_LIMIT_RANGE.start(),
                    max: *DAILY_LIMIT_RANGE.end(),
                });
            }
        }
    }

    if let Some(value) = raw.grid_size {
        if !GRID_SIZE_RANGE.contains(&value) {
            errors.push(ValidationError::GridSizeOutOfRange {
                value,
                min: *GRID_SIZE_RANGE.start(),
                max: *GRID_SIZE_RANGE.end(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RawServiceConfig;

    fn raw(daily: Option<u32>, grid: Option<u32>) -> RawSettings {
        RawSettings {
            settings_version: 1,
            daily_limit_minutes: daily,
            grid_size: grid,
            service: RawServiceConfig::default(),
        }
    }

    #[test]
    fn accepts_in_range_values() {
        assert!(validate_settings(&raw(Some(5), Some(4))).is_empty());
        assert!(validate_settings(&raw(Some(180), Some(15))).is_empty());
        assert!(validate_settings(&raw(Some(45), None)).is_empty());
    }

    #[test]
    fn missing_daily_limit_is_an_error() {
        let errors = validate_settings(&raw(None, None));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::MissingDailyLimit)));
    }

    #[test]
    fn out_of_range_daily_limit() {
        let errors = validate_settings(&raw(Some(4), None));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::DailyLimitOutOfRange { value: 4, .. })));

        let errors = validate_settings(&raw(Some(181), None));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn out_of_range_grid_size() {
        let errors = validate_settings(&raw(Some(45), Some(3)));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::GridSizeOutOfRange { value: 3, .. })));

        let errors = validate_settings(&raw(Some(45), Some(16)));
        assert_eq!(errors.len(), 1);
    }
}
