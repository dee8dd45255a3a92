//! SQLite-based store implementation

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use vidgate_api::Video;
use vidgate_util::{VideoId, day_key, format_day_key};

use crate::{
    CatalogRow, NewWatchEvent, StoreError, StoreResult, VideoCatalog, WatchCount, WatchEvent,
    WatchHistory,
};

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- Catalog rows, one per (video, source). Reads collapse by id.
            CREATE TABLE IF NOT EXISTS videos (
                id TEXT NOT NULL,
                source TEXT NOT NULL,
                title TEXT NOT NULL,
                thumbnail_url TEXT,
                duration_secs INTEGER NOT NULL,
                available INTEGER NOT NULL DEFAULT 1,
                PRIMARY KEY (id, source)
            );

            -- Ban set, keyed by video id
            CREATE TABLE IF NOT EXISTS banned_videos (
                video_id TEXT PRIMARY KEY
            );

            -- Watch-history ledger (append-only)
            CREATE TABLE IF NOT EXISTS watch_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                video_id TEXT NOT NULL,
                watched_at TEXT NOT NULL,
                day TEXT NOT NULL,
                duration_secs INTEGER NOT NULL,
                completed INTEGER NOT NULL,
                manual_replay INTEGER NOT NULL,
                grace_use INTEGER NOT NULL,
                counts_toward_limit INTEGER NOT NULL
            );

            -- Indexes
            CREATE INDEX IF NOT EXISTS idx_watch_events_day ON watch_events(day);
            CREATE INDEX IF NOT EXISTS idx_watch_events_video ON watch_events(video_id);
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }

    /// Check if store is healthy
    pub fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => false,
        }
    }
}

fn parse_video_id(s: &str) -> StoreResult<VideoId> {
    VideoId::parse(s).map_err(|e| StoreError::Corrupt(format!("video id '{}': {}", s, e)))
}

fn parse_timestamp(s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp '{}': {}", s, e)))
}

type EventRow = (i64, String, String, u32, bool, bool, bool, bool);

fn event_from_row(row: EventRow) -> StoreResult<WatchEvent> {
    let (id, video_id, watched_at, duration_watched_seconds, completed, manual_replay, grace_use, counts) =
        row;
    Ok(WatchEvent {
        id,
        video_id: parse_video_id(&video_id)?,
        watched_at: parse_timestamp(&watched_at)?,
        duration_watched_seconds,
        completed,
        manual_replay,
        grace_use,
        counts_toward_limit: counts,
    })
}

impl WatchHistory for SqliteStore {
    fn append_event(&self, event: NewWatchEvent) -> StoreResult<WatchEvent> {
        let conn = self.conn.lock().unwrap();
        let day = format_day_key(day_key(event.watched_at));

        // Single INSERT; SQLite makes the append atomic.
        conn.execute(
            r#"
            INSERT INTO watch_events
                (video_id, watched_at, day, duration_secs, completed,
                 manual_replay, grace_use, counts_toward_limit)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                event.video_id.as_str(),
                event.watched_at.to_rfc3339(),
                day,
                event.duration_watched_seconds,
                event.completed,
                event.manual_replay,
                event.grace_use,
                event.counts_toward_limit(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        let counts_toward_limit = event.counts_toward_limit();
        debug!(
            event_id = id,
            video_id = %event.video_id,
            counts = counts_toward_limit,
            "Watch event appended"
        );

        Ok(WatchEvent {
            id,
            video_id: event.video_id,
            watched_at: event.watched_at,
            duration_watched_seconds: event.duration_watched_seconds,
            completed: event.completed,
            manual_replay: event.manual_replay,
            grace_use: event.grace_use,
            counts_toward_limit,
        })
    }

    fn events_for_day(&self, day: NaiveDate) -> StoreResult<Vec<WatchEvent>> {
        let conn = self.conn.lock().unwrap();
        let day_str = format_day_key(day);

        let mut stmt = conn.prepare(
            r#"
            SELECT id, video_id, watched_at, duration_secs, completed,
                   manual_replay, grace_use, counts_toward_limit
            FROM watch_events
            WHERE day = ?
            ORDER BY id ASC
            "#,
        )?;

        let rows = stmt.query_map([day_str], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(event_from_row(row?)?);
        }
        Ok(events)
    }

    fn recent_events(&self, limit: usize) -> StoreResult<Vec<WatchEvent>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT id, video_id, watched_at, duration_secs, completed,
                   manual_replay, grace_use, counts_toward_limit
            FROM watch_events
            ORDER BY id DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map([limit], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(event_from_row(row?)?);
        }
        Ok(events)
    }

    fn watch_counts(&self) -> StoreResult<Vec<WatchCount>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT video_id,
                   SUM(counts_toward_limit) AS countable,
                   SUM(CASE WHEN completed AND counts_toward_limit THEN 1 ELSE 0 END) AS completions
            FROM watch_events
            GROUP BY video_id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let video_id: String = row.get(0)?;
            let countable: u32 = row.get(1)?;
            let completions: u32 = row.get(2)?;
            Ok((video_id, countable, completions))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (video_id, countable_watches, completions) = row?;
            counts.push(WatchCount {
                video_id: parse_video_id(&video_id)?,
                countable_watches,
                completions,
            });
        }
        Ok(counts)
    }
}

type VideoRow = (String, String, Option<String>, u32, bool, bool);

fn video_from_row(row: VideoRow) -> StoreResult<Video> {
    let (id, title, thumbnail_url, duration_seconds, available, banned) = row;
    Ok(Video {
        id: parse_video_id(&id)?,
        title,
        thumbnail_url,
        duration_seconds,
        available,
        banned,
    })
}

impl VideoCatalog for SqliteStore {
    fn upsert_video(&self, row: CatalogRow) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            r#"
            INSERT INTO videos (id, source, title, thumbnail_url, duration_secs, available)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id, source)
            DO UPDATE SET title = excluded.title,
                          thumbnail_url = excluded.thumbnail_url,
                          duration_secs = excluded.duration_secs,
                          available = excluded.available
            "#,
            params![
                row.id.as_str(),
                row.source,
                row.title,
                row.thumbnail_url,
                row.duration_seconds,
                row.available,
            ],
        )?;

        debug!(video_id = %row.id, source = %row.source, "Catalog row upserted");
        Ok(())
    }

    fn list_videos(&self) -> StoreResult<Vec<Video>> {
        let conn = self.conn.lock().unwrap();

        // Collapse duplicate source rows: availability is global per id, so
        // one unavailable row marks the whole video unavailable.
        let mut stmt = conn.prepare(
            r#"
            SELECT v.id, MIN(v.title), MIN(v.thumbnail_url), MAX(v.duration_secs),
                   MIN(v.available),
                   CASE WHEN b.video_id IS NULL THEN 0 ELSE 1 END AS banned
            FROM videos v
            LEFT JOIN banned_videos b ON b.video_id = v.id
            GROUP BY v.id
            ORDER BY v.id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?;

        let mut videos = Vec::new();
        for row in rows {
            videos.push(video_from_row(row?)?);
        }
        Ok(videos)
    }

    fn get_video(&self, id: &VideoId) -> StoreResult<Option<Video>> {
        let conn = self.conn.lock().unwrap();

        let row = conn
            .query_row(
                r#"
                SELECT v.id, MIN(v.title), MIN(v.thumbnail_url), MAX(v.duration_secs),
                       MIN(v.available),
                       CASE WHEN b.video_id IS NULL THEN 0 ELSE 1 END AS banned
                FROM videos v
                LEFT JOIN banned_videos b ON b.video_id = v.id
                WHERE v.id = ?
                GROUP BY v.id
                "#,
                [id.as_str()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some(row) => Ok(Some(video_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn mark_unavailable(&self, id: &VideoId) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "UPDATE videos SET available = 0 WHERE id = ?",
            [id.as_str()],
        )?;

        debug!(video_id = %id, "Video marked unavailable");
        Ok(())
    }

    fn set_banned(&self, id: &VideoId, banned: bool) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        if banned {
            conn.execute(
                "INSERT OR IGNORE INTO banned_videos (video_id) VALUES (?)",
                [id.as_str()],
            )?;
        } else {
            conn.execute(
                "DELETE FROM banned_videos WHERE video_id = ?",
                [id.as_str()],
            )?;
        }

        debug!(video_id = %id, banned, "Ban flag updated");
        Ok(())
    }
}
