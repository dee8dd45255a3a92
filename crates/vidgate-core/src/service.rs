//! Request-facing facade over the engine
//!
//! One instance serves every request kind the routing layer forwards:
//! grid fetches, watch logs, limit status, and availability updates. Each
//! request is independent; the summary is re-derived from the ledger every
//! time, so a watch log is visible to the very next status fetch.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use std::sync::{Arc, Mutex};
use tracing::info;
use vidgate_api::{DailySummary, GridResponse, StatusResponse, WatchRequest, WatchResponse};
use vidgate_config::Settings;
use vidgate_store::Store;
use vidgate_util::{VideoId, day_key};

use crate::{EngagementIndex, EngineError, EngineResult, WatchLogger, compute_summary, select_videos};

/// The viewing-session engine behind the routing layer.
pub struct ViewingService {
    store: Arc<dyn Store>,
    logger: WatchLogger,
    settings: Settings,
    rng: Mutex<Mcg128Xsl64>,
}

impl ViewingService {
    /// Create a service with an entropy-seeded RNG.
    pub fn new(settings: Settings, store: Arc<dyn Store>) -> Self {
        Self::with_rng(settings, store, Mcg128Xsl64::from_entropy())
    }

    /// Create a service with a fixed RNG seed (deterministic selection,
    /// for tests).
    pub fn with_seed(settings: Settings, store: Arc<dyn Store>, seed: u64) -> Self {
        Self::with_rng(settings, store, Mcg128Xsl64::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, store: Arc<dyn Store>, rng: Mcg128Xsl64) -> Self {
        info!(
            daily_limit_minutes = settings.daily_limit_minutes,
            grid_size = settings.grid_size,
            "Viewing service initialized"
        );

        Self {
            logger: WatchLogger::new(store.clone()),
            store,
            settings,
            rng: Mutex::new(rng),
        }
    }

    /// Today's summary, derived fresh from the ledger.
    fn summary(&self, now: DateTime<Utc>) -> EngineResult<DailySummary> {
        let todays = self.store.events_for_day(day_key(now))?;
        compute_summary(now, &todays, self.settings.daily_limit_minutes)
    }

    /// Fetch a grid of videos for display.
    ///
    /// `count` defaults to the configured grid size. Fails with
    /// [`EngineError::ServiceUnavailable`] only when no eligible video
    /// exists at all; a Locked day returns an empty grid with the summary
    /// so the caller can route to the lockout screen.
    pub fn fetch_videos(
        &self,
        count: Option<usize>,
        now: DateTime<Utc>,
    ) -> EngineResult<GridResponse> {
        let daily_limit = self.summary(now)?;
        let catalog = self.store.list_videos()?;

        if !catalog.iter().any(|v| v.eligible()) {
            return Err(EngineError::ServiceUnavailable);
        }

        let engagement = EngagementIndex::from_counts(self.store.watch_counts()?);
        let requested = count.unwrap_or(self.settings.grid_size);

        let videos = {
            let mut rng = self.rng.lock().unwrap();
            select_videos(&daily_limit, &catalog, &engagement, requested, &mut *rng)
        };

        info!(
            state = ?daily_limit.state,
            minutes_remaining = daily_limit.minutes_remaining,
            requested,
            returned = videos.len(),
            "Grid selected"
        );

        Ok(GridResponse {
            videos,
            daily_limit,
        })
    }

    /// Record a playback outcome.
    pub fn log_watch(
        &self,
        req: &WatchRequest,
        now: DateTime<Utc>,
    ) -> EngineResult<WatchResponse> {
        let daily_limit =
            self.logger
                .record_watch(req, self.settings.daily_limit_minutes, now)?;

        Ok(WatchResponse {
            success: true,
            daily_limit,
        })
    }

    /// Fetch today's limit status.
    pub fn limit_status(&self, now: DateTime<Utc>) -> EngineResult<StatusResponse> {
        Ok(StatusResponse {
            daily_limit: self.summary(now)?,
        })
    }

    /// Mark a video unavailable across all of its source rows.
    /// Ownership of availability stays with the catalog; this is a
    /// pass-through for the routing layer.
    pub fn mark_unavailable(&self, id: &VideoId) -> EngineResult<()> {
        self.store.mark_unavailable(id)?;
        info!(video_id = %id, "Video marked unavailable");
        Ok(())
    }
}
