//! Shared types for the vidgate API surface

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vidgate_util::VideoId;

/// A catalog video as presented to the selection engine and the UI.
///
/// Duplicate rows from different content sources are collapsed by id before
/// this type is handed out; `available` and `banned` are global per id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: u32,
    pub available: bool,
    pub banned: bool,
}

impl Video {
    /// Whether this video may ever be shown to the child.
    pub fn eligible(&self) -> bool {
        self.available && !self.banned
    }
}

/// Discrete viewing state derived from the day's countable watch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewingState {
    /// More than the wind-down threshold remaining
    Normal,
    /// Ten minutes or less remaining; selection restricted to what fits
    WindDown,
    /// Budget exhausted, one bonus video still available
    Grace,
    /// Budget exhausted and the grace video already used today
    Locked,
}

impl ViewingState {
    pub fn is_locked(&self) -> bool {
        matches!(self, ViewingState::Locked)
    }
}

/// Snapshot of today's budget, recomputed from the ledger on every request.
/// Never persisted; there is no stored "current state" to go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// UTC calendar day the summary covers
    pub day: NaiveDate,
    pub state: ViewingState,
    /// Whole countable minutes watched today
    pub minutes_watched: u32,
    /// Whole minutes left in today's budget (never negative)
    pub minutes_remaining: u32,
    pub grace_consumed_today: bool,
    pub daily_limit_minutes: u32,
}

/// A playback outcome reported by the player boundary.
///
/// `counts_toward_limit` is deliberately absent: the engine derives it
/// server-side and never accepts it from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchRequest {
    pub video_id: VideoId,
    pub completed: bool,
    pub duration_watched_seconds: u32,
    /// Supervised replay requested by the parent; excluded from the quota
    #[serde(default)]
    pub manual_replay: bool,
    /// The one post-limit bonus video; excluded from the quota
    #[serde(default)]
    pub grace_use: bool,
}

/// Response to a grid fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    pub videos: Vec<Video>,
    pub daily_limit: DailySummary,
}

/// Response to a watch log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchResponse {
    pub success: bool,
    pub daily_limit: DailySummary,
}

/// Response to a limit status fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub daily_limit: DailySummary,
}
