//! Watch-event types
//!
//! A watch event is written once per playback outcome and never mutated.
//! Whether an event counts toward the daily limit is derived here, in the
//! constructor, and nowhere else: supervised replays and the grace video
//! never count. Callers cannot set the flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vidgate_util::VideoId;

/// A new playback outcome, ready to append to the ledger.
#[derive(Debug, Clone)]
pub struct NewWatchEvent {
    pub video_id: VideoId,
    pub watched_at: DateTime<Utc>,
    pub duration_watched_seconds: u32,
    pub completed: bool,
    pub manual_replay: bool,
    pub grace_use: bool,
    counts_toward_limit: bool,
}

impl NewWatchEvent {
    /// Build an event. `counts_toward_limit` is always computed as
    /// `!manual_replay && !grace_use`; it is not a parameter.
    pub fn new(
        video_id: VideoId,
        watched_at: DateTime<Utc>,
        duration_watched_seconds: u32,
        completed: bool,
        manual_replay: bool,
        grace_use: bool,
    ) -> Self {
        Self {
            video_id,
            watched_at,
            duration_watched_seconds,
            completed,
            manual_replay,
            grace_use,
            counts_toward_limit: !manual_replay && !grace_use,
        }
    }

    pub fn counts_toward_limit(&self) -> bool {
        self.counts_toward_limit
    }
}

/// A persisted watch event as read back from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEvent {
    /// Ledger row ID
    pub id: i64,
    pub video_id: VideoId,
    pub watched_at: DateTime<Utc>,
    pub duration_watched_seconds: u32,
    pub completed: bool,
    pub manual_replay: bool,
    pub grace_use: bool,
    pub counts_toward_limit: bool,
}

/// Per-video aggregate over the whole ledger, used to derive engagement.
#[derive(Debug, Clone)]
pub struct WatchCount {
    pub video_id: VideoId,
    /// Countable watch events (any duration)
    pub countable_watches: u32,
    /// Countable watch events that ran to completion
    pub completions: u32,
}
