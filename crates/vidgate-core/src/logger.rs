//! Watch logging
//!
//! The logger is the only writer of the watch-history ledger. Each call
//! validates the reported playback outcome, appends exactly one event, and
//! returns a freshly derived daily summary. Whether the event counts toward
//! the limit is computed in the event constructor, never taken from the
//! request.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use vidgate_api::{DailySummary, WatchRequest};
use vidgate_config::{MAX_PLAUSIBLE_WATCH_SECONDS, WATCH_DURATION_TOLERANCE_SECONDS};
use vidgate_store::{NewWatchEvent, Store};
use vidgate_util::day_key;

use crate::{EngineError, EngineResult, compute_summary};

/// Validates and appends playback outcomes.
pub struct WatchLogger {
    store: Arc<dyn Store>,
}

impl WatchLogger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Record one playback outcome and return the updated summary.
    ///
    /// Implausible payloads are rejected as [`EngineError::DataIntegrity`]
    /// and logged for investigation; nothing is clamped or written.
    pub fn record_watch(
        &self,
        req: &WatchRequest,
        daily_limit_minutes: u32,
        now: DateTime<Utc>,
    ) -> EngineResult<DailySummary> {
        // Only videos the catalog has actually observed may be logged; a
        // tampered client cannot invent ledger rows for arbitrary ids.
        let video = self
            .store
            .get_video(&req.video_id)?
            .ok_or_else(|| {
                warn!(video_id = %req.video_id, "Watch rejected: video not in catalog");
                EngineError::DataIntegrity(format!(
                    "video {} is not in the catalog",
                    req.video_id
                ))
            })?;

        if req.duration_watched_seconds > MAX_PLAUSIBLE_WATCH_SECONDS {
            warn!(
                video_id = %req.video_id,
                duration_secs = req.duration_watched_seconds,
                ceiling_secs = MAX_PLAUSIBLE_WATCH_SECONDS,
                "Watch rejected: duration above sanity ceiling"
            );
            return Err(EngineError::DataIntegrity(format!(
                "watched duration {}s exceeds the sanity ceiling",
                req.duration_watched_seconds
            )));
        }

        let max_believable = video.duration_seconds + WATCH_DURATION_TOLERANCE_SECONDS;
        if req.duration_watched_seconds > max_believable {
            warn!(
                video_id = %req.video_id,
                duration_secs = req.duration_watched_seconds,
                video_duration_secs = video.duration_seconds,
                "Watch rejected: duration exceeds video length"
            );
            return Err(EngineError::DataIntegrity(format!(
                "watched duration {}s exceeds video length {}s",
                req.duration_watched_seconds, video.duration_seconds
            )));
        }

        let event = NewWatchEvent::new(
            req.video_id.clone(),
            now,
            req.duration_watched_seconds,
            req.completed,
            req.manual_replay,
            req.grace_use,
        );
        let counts = event.counts_toward_limit();

        // One append per call; the store makes it atomic.
        let stored = self.store.append_event(event)?;

        info!(
            event_id = stored.id,
            video_id = %req.video_id,
            duration_secs = req.duration_watched_seconds,
            completed = req.completed,
            counts_toward_limit = counts,
            "Watch recorded"
        );

        let todays = self.store.events_for_day(day_key(now))?;
        compute_summary(now, &todays, daily_limit_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidgate_api::ViewingState;
    use vidgate_store::{CatalogRow, SqliteStore, VideoCatalog, WatchHistory};
    use vidgate_util::VideoId;

    fn vid() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    fn store_with_video(duration_seconds: u32) -> Arc<SqliteStore> {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .upsert_video(CatalogRow {
                id: vid(),
                source: "channel-1".into(),
                title: "Test Video".into(),
                thumbnail_url: None,
                duration_seconds,
                available: true,
            })
            .unwrap();
        store
    }

    fn request(duration: u32, manual_replay: bool, grace_use: bool) -> WatchRequest {
        WatchRequest {
            video_id: vid(),
            completed: true,
            duration_watched_seconds: duration,
            manual_replay,
            grace_use,
        }
    }

    #[test]
    fn records_and_returns_fresh_summary() {
        let store = store_with_video(600);
        let logger = WatchLogger::new(store.clone());

        let summary = logger.record_watch(&request(600, false, false), 30, Utc::now()).unwrap();
        assert_eq!(summary.minutes_watched, 10);
        assert_eq!(summary.minutes_remaining, 20);
        assert_eq!(summary.state, ViewingState::Normal);

        let events = store.recent_events(10).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].counts_toward_limit);
    }

    #[test]
    fn replay_is_excluded_from_the_quota() {
        let store = store_with_video(600);
        let logger = WatchLogger::new(store.clone());

        let summary = logger.record_watch(&request(600, true, false), 30, Utc::now()).unwrap();
        assert_eq!(summary.minutes_watched, 0);
        assert_eq!(summary.minutes_remaining, 30);

        let events = store.recent_events(10).unwrap();
        assert!(!events[0].counts_toward_limit);
    }

    #[test]
    fn unknown_video_is_rejected() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let logger = WatchLogger::new(store.clone());

        let result = logger.record_watch(&request(60, false, false), 30, Utc::now());
        assert!(matches!(result, Err(EngineError::DataIntegrity(_))));

        // Nothing written
        assert!(store.recent_events(10).unwrap().is_empty());
    }

    #[test]
    fn implausible_duration_is_rejected_not_clamped() {
        let store = store_with_video(600);
        let logger = WatchLogger::new(store.clone());

        // Far beyond video length + tolerance
        let result = logger.record_watch(&request(2000, false, false), 30, Utc::now());
        assert!(matches!(result, Err(EngineError::DataIntegrity(_))));
        assert!(store.recent_events(10).unwrap().is_empty());

        // Within tolerance is fine
        let within = request(600 + WATCH_DURATION_TOLERANCE_SECONDS, false, false);
        logger.record_watch(&within, 30, Utc::now()).unwrap();
        assert_eq!(store.recent_events(10).unwrap().len(), 1);
    }

    #[test]
    fn sanity_ceiling_applies_even_to_long_videos() {
        let store = store_with_video(MAX_PLAUSIBLE_WATCH_SECONDS + 3600);
        let logger = WatchLogger::new(store);

        let result = logger.record_watch(
            &request(MAX_PLAUSIBLE_WATCH_SECONDS + 1, false, false),
            30,
            Utc::now(),
        );
        assert!(matches!(result, Err(EngineError::DataIntegrity(_))));
    }
}
