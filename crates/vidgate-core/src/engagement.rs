//! Engagement weights derived from the watch-history ledger
//!
//! A video with no prior countable watch event is novel. Familiar videos
//! carry a weight of `completions + 1`, so a video the child has started
//! but never finished stays reachable instead of decaying to zero.

use std::collections::HashMap;
use vidgate_store::WatchCount;
use vidgate_util::VideoId;

#[derive(Debug, Clone, Copy, Default)]
struct Engagement {
    countable_watches: u32,
    completions: u32,
}

/// Per-video familiarity index built from ledger aggregates.
#[derive(Debug, Clone, Default)]
pub struct EngagementIndex {
    counts: HashMap<VideoId, Engagement>,
}

impl EngagementIndex {
    pub fn from_counts(counts: Vec<WatchCount>) -> Self {
        let counts = counts
            .into_iter()
            .map(|c| {
                (
                    c.video_id,
                    Engagement {
                        countable_watches: c.countable_watches,
                        completions: c.completions,
                    },
                )
            })
            .collect();
        Self { counts }
    }

    /// True when the video has no prior countable watch event.
    pub fn is_novel(&self, id: &VideoId) -> bool {
        self.counts
            .get(id)
            .map(|e| e.countable_watches == 0)
            .unwrap_or(true)
    }

    /// Sampling weight for a familiar video.
    pub fn weight(&self, id: &VideoId) -> f64 {
        let completions = self.counts.get(id).map(|e| e.completions).unwrap_or(0);
        f64::from(completions) + 1.0
    }
}
