//! Validated settings and fixed product constants

use crate::schema::RawSettings;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Allowed range for the daily viewing budget, in minutes.
pub const DAILY_LIMIT_RANGE: RangeInclusive<u32> = 5..=180;

/// Allowed range for the grid size.
pub const GRID_SIZE_RANGE: RangeInclusive<u32> = 4..=15;

/// Grid size used when the settings file does not specify one.
pub const DEFAULT_GRID_SIZE: usize = 9;

/// Remaining-minutes marks at which the UI shows a time warning.
pub const WARNING_THRESHOLDS_MINUTES: [u32; 3] = [10, 5, 2];

/// Remaining minutes at or below which the day enters wind-down.
pub const WIND_DOWN_THRESHOLD_MINUTES: u32 = 10;

/// Longest video offered as the post-limit grace video, in seconds.
pub const GRACE_VIDEO_MAX_SECONDS: u32 = 300;

/// Extra minutes a started video is allowed to run past the remaining
/// budget before it must be interrupted.
pub const INTERRUPT_GRACE_MINUTES: u32 = 5;

/// Sanity ceiling on a single reported watch duration, in seconds.
/// Nothing in the curated catalog runs anywhere near this long.
pub const MAX_PLAUSIBLE_WATCH_SECONDS: u32 = 21_600;

/// Slack allowed between a reported watch duration and the video's own
/// duration, in seconds. Covers player buffering and rounding at the client.
pub const WATCH_DURATION_TOLERANCE_SECONDS: u32 = 30;

/// Validated settings ready for use by the engine
#[derive(Debug, Clone)]
pub struct Settings {
    /// Daily viewing budget in minutes (5-180)
    pub daily_limit_minutes: u32,

    /// Videos per grid request (4-15)
    pub grid_size: usize,

    /// Service paths
    pub service: ServiceConfig,
}

impl Settings {
    /// Convert from raw settings (after validation)
    pub fn from_raw(raw: RawSettings) -> Self {
        Self {
            // Validation guarantees presence; from_raw is only reachable
            // through parse_settings.
            daily_limit_minutes: raw.daily_limit_minutes.unwrap_or(*DAILY_LIMIT_RANGE.start()),
            grid_size: raw
                .grid_size
                .map(|g| g as usize)
                .unwrap_or(DEFAULT_GRID_SIZE),
            service: ServiceConfig::from_raw(raw.service),
        }
    }
}

/// Service-level configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
}

impl ServiceConfig {
    fn from_raw(raw: crate::schema::RawServiceConfig) -> Self {
        Self {
            data_dir: raw
                .data_dir
                .unwrap_or_else(vidgate_util::data_dir_without_env),
        }
    }
}
