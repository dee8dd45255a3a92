//! Integration tests for the viewing service
//!
//! These tests drive the full request surface (grid fetch, watch log,
//! status) against a real in-memory store and walk a day from Normal
//! through WindDown and Grace to Locked.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use vidgate_api::{ViewingState, WatchRequest};
use vidgate_config::{GRACE_VIDEO_MAX_SECONDS, Settings, parse_settings};
use vidgate_core::{EngineError, ViewingService};
use vidgate_store::{CatalogRow, SqliteStore, VideoCatalog};
use vidgate_util::VideoId;

fn test_settings(daily_limit_minutes: u32) -> Settings {
    parse_settings(&format!(
        r#"
        settings_version = 1
        daily_limit_minutes = {}
        grid_size = 6
    "#,
        daily_limit_minutes
    ))
    .unwrap()
}

fn vid(n: usize) -> VideoId {
    VideoId::parse(format!("video-{:05}", n)).unwrap()
}

fn seeded_store(video_count: usize, duration_seconds: u32) -> Arc<SqliteStore> {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    for n in 0..video_count {
        store
            .upsert_video(CatalogRow {
                id: vid(n),
                source: "channel-1".into(),
                title: format!("Video {}", n),
                thumbnail_url: None,
                duration_seconds,
                available: true,
            })
            .unwrap();
    }
    store
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn watch(service: &ViewingService, n: usize, seconds: u32, grace_use: bool, now: DateTime<Utc>) {
    let req = WatchRequest {
        video_id: vid(n),
        completed: true,
        duration_watched_seconds: seconds,
        manual_replay: false,
        grace_use,
    };
    let response = service.log_watch(&req, now).unwrap();
    assert!(response.success);
}

#[test]
fn grid_fetch_returns_grid_size_videos() {
    let store = seeded_store(20, 240);
    let service = ViewingService::with_seed(test_settings(30), store, 1);

    let grid = service.fetch_videos(None, noon()).unwrap();
    assert_eq!(grid.videos.len(), 6);
    assert_eq!(grid.daily_limit.state, ViewingState::Normal);
    assert_eq!(grid.daily_limit.minutes_remaining, 30);
}

#[test]
fn empty_catalog_is_service_unavailable() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let service = ViewingService::with_seed(test_settings(30), store, 1);

    let result = service.fetch_videos(None, noon());
    assert!(matches!(result, Err(EngineError::ServiceUnavailable)));
}

#[test]
fn all_ineligible_catalog_is_service_unavailable() {
    let store = seeded_store(3, 240);
    for n in 0..3 {
        store.mark_unavailable(&vid(n)).unwrap();
    }
    let service = ViewingService::with_seed(test_settings(30), store, 1);

    let result = service.fetch_videos(None, noon());
    assert!(matches!(result, Err(EngineError::ServiceUnavailable)));
}

#[test]
fn watch_log_is_visible_to_the_next_status_fetch() {
    let store = seeded_store(5, 600);
    let service = ViewingService::with_seed(test_settings(30), store, 1);

    watch(&service, 0, 600, false, noon());

    let status = service.limit_status(noon()).unwrap();
    assert_eq!(status.daily_limit.minutes_watched, 10);
    assert_eq!(status.daily_limit.minutes_remaining, 20);
}

#[test]
fn day_walks_from_normal_to_locked() {
    let store = seeded_store(30, GRACE_VIDEO_MAX_SECONDS);
    let service = ViewingService::with_seed(test_settings(20), store, 1);
    let now = noon();

    // Fresh day: Normal
    let status = service.limit_status(now).unwrap();
    assert_eq!(status.daily_limit.state, ViewingState::Normal);

    // 10 minutes watched, 10 remaining: WindDown
    watch(&service, 0, 300, false, now);
    watch(&service, 1, 300, false, now);
    let status = service.limit_status(now).unwrap();
    assert_eq!(status.daily_limit.state, ViewingState::WindDown);
    assert_eq!(status.daily_limit.minutes_remaining, 10);

    // Budget exhausted: Grace
    watch(&service, 2, 300, false, now);
    watch(&service, 3, 300, false, now);
    let status = service.limit_status(now).unwrap();
    assert_eq!(status.daily_limit.state, ViewingState::Grace);
    assert_eq!(status.daily_limit.minutes_remaining, 0);

    // Grace grid stays within the grace ceiling
    let grid = service.fetch_videos(None, now).unwrap();
    assert!(!grid.videos.is_empty());
    assert!(
        grid.videos
            .iter()
            .all(|v| v.duration_seconds <= GRACE_VIDEO_MAX_SECONDS)
    );

    // Grace video used: Locked, and the grace watch added no minutes
    watch(&service, 4, 300, true, now);
    let status = service.limit_status(now).unwrap();
    assert_eq!(status.daily_limit.state, ViewingState::Locked);
    assert!(status.daily_limit.grace_consumed_today);
    assert_eq!(status.daily_limit.minutes_watched, 20);

    // Locked grid is empty; the summary still reports the lockout
    let grid = service.fetch_videos(None, now).unwrap();
    assert!(grid.videos.is_empty());
    assert_eq!(grid.daily_limit.state, ViewingState::Locked);
}

#[test]
fn budget_returns_at_utc_day_rollover() {
    let store = seeded_store(5, 600);
    let service = ViewingService::with_seed(test_settings(30), store, 1);
    let today = noon();

    watch(&service, 0, 600, false, today);
    watch(&service, 1, 600, false, today);
    watch(&service, 2, 600, false, today);
    let status = service.limit_status(today).unwrap();
    assert_eq!(status.daily_limit.state, ViewingState::Grace);

    // Nothing is reset; the next day simply has no countable events
    let tomorrow = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 1).unwrap();
    let status = service.limit_status(tomorrow).unwrap();
    assert_eq!(status.daily_limit.state, ViewingState::Normal);
    assert_eq!(status.daily_limit.minutes_remaining, 30);
    assert!(!status.daily_limit.grace_consumed_today);
}

#[test]
fn manual_replay_leaves_the_budget_untouched() {
    let store = seeded_store(5, 600);
    let service = ViewingService::with_seed(test_settings(30), store, 1);
    let now = noon();

    let req = WatchRequest {
        video_id: vid(0),
        completed: true,
        duration_watched_seconds: 600,
        manual_replay: true,
        grace_use: false,
    };
    let response = service.log_watch(&req, now).unwrap();
    assert_eq!(response.daily_limit.minutes_watched, 0);
    assert_eq!(response.daily_limit.minutes_remaining, 30);
}

#[test]
fn mark_unavailable_removes_video_from_grids() {
    let store = seeded_store(2, 240);
    let service = ViewingService::with_seed(test_settings(30), store, 1);
    let now = noon();

    service.mark_unavailable(&vid(0)).unwrap();

    for _ in 0..50 {
        let grid = service.fetch_videos(Some(2), now).unwrap();
        assert_eq!(grid.videos.len(), 1);
        assert_eq!(grid.videos[0].id, vid(1));
    }
}

#[test]
fn tampered_watch_is_rejected_and_changes_nothing() {
    let store = seeded_store(2, 240);
    let service = ViewingService::with_seed(test_settings(30), store, 1);
    let now = noon();

    // Video the catalog has never observed
    let unknown = WatchRequest {
        video_id: VideoId::parse("nope-nope-0").unwrap(),
        completed: true,
        duration_watched_seconds: 60,
        manual_replay: false,
        grace_use: false,
    };
    assert!(matches!(
        service.log_watch(&unknown, now),
        Err(EngineError::DataIntegrity(_))
    ));

    // Duration far beyond the video's own length
    let inflated = WatchRequest {
        video_id: vid(0),
        completed: true,
        duration_watched_seconds: 4000,
        manual_replay: false,
        grace_use: false,
    };
    assert!(matches!(
        service.log_watch(&inflated, now),
        Err(EngineError::DataIntegrity(_))
    ));

    let status = service.limit_status(now).unwrap();
    assert_eq!(status.daily_limit.minutes_watched, 0);
}
