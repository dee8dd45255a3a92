//! Duration-aware, novelty-balanced video selection
//!
//! Selection happens in three stages:
//! 1. Hard filtering: banned or unavailable videos are dropped
//!    unconditionally, then a duration ceiling is applied by state.
//! 2. Relaxation: if the ceiling starves the grid, WindDown drops the
//!    ceiling and Grace falls back to the shortest eligible videos. An
//!    empty grid is never produced while an eligible video exists, except
//!    in Locked where no non-grace candidate is ever offered.
//! 3. Sampling: a per-request novelty fraction drawn from [0.6, 0.8]
//!    splits the grid between novel videos (uniform) and familiar ones
//!    (engagement-weighted), then the result is shuffled so ordering
//!    carries no signal about how each video was picked.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use vidgate_api::{DailySummary, Video, ViewingState};
use vidgate_config::GRACE_VIDEO_MAX_SECONDS;

use crate::EngagementIndex;

/// Bounds of the per-request novelty fraction.
pub const NOVELTY_FRACTION_RANGE: (f64, f64) = (0.6, 0.8);

/// Pick up to `requested` videos to present for the given day state.
///
/// The result is shorter than `requested` only when the catalog truly has
/// fewer eligible candidates. The RNG is injected so tests can seed it.
pub fn select_videos<R: Rng>(
    summary: &DailySummary,
    catalog: &[Video],
    engagement: &EngagementIndex,
    requested: usize,
    rng: &mut R,
) -> Vec<Video> {
    if requested == 0 || summary.state.is_locked() {
        return Vec::new();
    }

    // Duplicate rows from multiple content sources collapse to one
    // candidate before any sampling.
    let mut seen = HashSet::new();
    let eligible: Vec<&Video> = catalog
        .iter()
        .filter(|v| v.eligible())
        .filter(|v| seen.insert(v.id.clone()))
        .collect();

    if eligible.is_empty() {
        return Vec::new();
    }

    let candidates = apply_duration_ceiling(summary, eligible, requested);

    sample_with_novelty(candidates, engagement, requested, rng)
}

/// Stage 2: state-dependent duration ceiling with relaxation.
fn apply_duration_ceiling<'a>(
    summary: &DailySummary,
    eligible: Vec<&'a Video>,
    requested: usize,
) -> Vec<&'a Video> {
    let ceiling_seconds = match summary.state {
        ViewingState::Normal => return eligible,
        ViewingState::WindDown => summary.minutes_remaining * 60,
        ViewingState::Grace => GRACE_VIDEO_MAX_SECONDS,
        ViewingState::Locked => unreachable!("locked handled by caller"),
    };

    let under_ceiling: Vec<&Video> = eligible
        .iter()
        .copied()
        .filter(|v| v.duration_seconds <= ceiling_seconds)
        .collect();

    if under_ceiling.len() >= requested {
        return under_ceiling;
    }

    match summary.state {
        // Not enough short videos to fill the grid: showing longer ones
        // beats showing nothing (playback is still budget-checked).
        ViewingState::WindDown => eligible,
        // The grace offer leans on the shortest videos available instead.
        ViewingState::Grace => {
            let mut by_duration = eligible;
            by_duration.sort_by_key(|v| (v.duration_seconds, v.id.clone()));
            by_duration.truncate(requested);
            by_duration
        }
        _ => unreachable!(),
    }
}

/// Stage 3: novelty/familiarity split and weighted sampling.
fn sample_with_novelty<R: Rng>(
    candidates: Vec<&Video>,
    engagement: &EngagementIndex,
    requested: usize,
    rng: &mut R,
) -> Vec<Video> {
    let total = requested.min(candidates.len());

    let (novel, familiar): (Vec<&Video>, Vec<&Video>) = candidates
        .into_iter()
        .partition(|v| engagement.is_novel(&v.id));

    // Fresh fraction per request keeps repeated grid fetches varied.
    let fraction = rng.gen_range(NOVELTY_FRACTION_RANGE.0..=NOVELTY_FRACTION_RANGE.1);
    let novel_target = (requested as f64 * fraction).round() as usize;

    // Each partition tops up the other's shortfall.
    let mut novel_take = novel_target.min(total).min(novel.len());
    let familiar_take = (total - novel_take).min(familiar.len());
    novel_take = (total - familiar_take).min(novel.len());

    let mut picked: Vec<Video> = novel
        .choose_multiple(rng, novel_take)
        .map(|v| (*v).clone())
        .collect();
    picked.extend(sample_weighted(familiar, familiar_take, engagement, rng));

    picked.shuffle(rng);
    picked
}

/// Weighted sampling without replacement: each draw removes the chosen
/// video and renormalizes over what remains.
fn sample_weighted<R: Rng>(
    mut pool: Vec<&Video>,
    take: usize,
    engagement: &EngagementIndex,
    rng: &mut R,
) -> Vec<Video> {
    let mut picked = Vec::with_capacity(take);

    for _ in 0..take {
        let total_weight: f64 = pool.iter().map(|v| engagement.weight(&v.id)).sum();
        let mut draw = rng.gen_range(0.0..total_weight);

        let mut chosen = pool.len() - 1;
        for (i, video) in pool.iter().enumerate() {
            let weight = engagement.weight(&video.id);
            if draw < weight {
                chosen = i;
                break;
            }
            draw -= weight;
        }

        picked.push(pool.swap_remove(chosen).clone());
    }

    picked
}
