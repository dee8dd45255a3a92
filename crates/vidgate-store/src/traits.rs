//! Store trait definitions

use chrono::NaiveDate;
use vidgate_api::Video;
use vidgate_util::VideoId;

use crate::{NewWatchEvent, StoreResult, WatchCount, WatchEvent};

/// Append-only ledger of playback events.
pub trait WatchHistory: Send + Sync {
    /// Append a playback event as a single atomic write.
    /// Returns the persisted row.
    fn append_event(&self, event: NewWatchEvent) -> StoreResult<WatchEvent>;

    /// All events whose UTC day key matches `day`, oldest first.
    fn events_for_day(&self, day: NaiveDate) -> StoreResult<Vec<WatchEvent>>;

    /// Most recent events, newest first.
    fn recent_events(&self, limit: usize) -> StoreResult<Vec<WatchEvent>>;

    /// Per-video countable-watch aggregates over the whole ledger.
    fn watch_counts(&self) -> StoreResult<Vec<WatchCount>>;
}

/// Queryable curated video set.
pub trait VideoCatalog: Send + Sync {
    /// Insert or update one source's row for a video. Ingestion may hold the
    /// same video under several sources; reads collapse them by id.
    fn upsert_video(&self, row: CatalogRow) -> StoreResult<()>;

    /// All videos, one entry per id (duplicate source rows collapsed).
    fn list_videos(&self) -> StoreResult<Vec<Video>>;

    /// A single video by id, collapsed across sources.
    fn get_video(&self, id: &VideoId) -> StoreResult<Option<Video>>;

    /// Mark a video unavailable across every source row.
    fn mark_unavailable(&self, id: &VideoId) -> StoreResult<()>;

    /// Add or remove a video from the ban set.
    fn set_banned(&self, id: &VideoId, banned: bool) -> StoreResult<()>;
}

/// Combined store surface the engine works against.
pub trait Store: WatchHistory + VideoCatalog {}

impl<T: WatchHistory + VideoCatalog> Store for T {}

/// One content source's row for a video, as produced by ingestion.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub id: VideoId,
    /// Which upstream source supplied this row (e.g. a channel or playlist)
    pub source: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: u32,
    pub available: bool,
}
