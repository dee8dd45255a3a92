//! Daily-limit state machine
//!
//! The viewing state is a pure function of the day's countable watch time
//! and the configured budget. No "current state" is ever stored: a fresh
//! UTC day simply has no countable events yet, which yields Normal with the
//! full budget.

use chrono::{DateTime, Utc};
use vidgate_api::{DailySummary, ViewingState};
use vidgate_config::{DAILY_LIMIT_RANGE, WIND_DOWN_THRESHOLD_MINUTES};
use vidgate_store::WatchEvent;
use vidgate_util::day_key;

use crate::{EngineError, EngineResult};

/// Derive today's summary from the event ledger and the daily budget.
///
/// Events outside the current UTC day are ignored, so passing the whole
/// ledger is safe; callers normally pass just today's slice.
pub fn compute_summary(
    now: DateTime<Utc>,
    events: &[WatchEvent],
    daily_limit_minutes: u32,
) -> EngineResult<DailySummary> {
    if !DAILY_LIMIT_RANGE.contains(&daily_limit_minutes) {
        return Err(EngineError::Configuration(format!(
            "daily_limit_minutes must be {}-{}, got {}",
            DAILY_LIMIT_RANGE.start(),
            DAILY_LIMIT_RANGE.end(),
            daily_limit_minutes
        )));
    }

    let day = day_key(now);
    let todays = events.iter().filter(|e| day_key(e.watched_at) == day);

    let mut countable_seconds: u64 = 0;
    let mut grace_consumed_today = false;
    for event in todays {
        if event.counts_toward_limit {
            countable_seconds += u64::from(event.duration_watched_seconds);
        }
        if event.grace_use {
            grace_consumed_today = true;
        }
    }

    let minutes_watched = (countable_seconds / 60) as u32;
    // Overshoot (a long video allowed to finish) saturates to zero and
    // lands in the same bucket as exactly zero.
    let minutes_remaining = daily_limit_minutes.saturating_sub(minutes_watched);

    let state = if minutes_remaining > WIND_DOWN_THRESHOLD_MINUTES {
        ViewingState::Normal
    } else if minutes_remaining > 0 {
        ViewingState::WindDown
    } else if !grace_consumed_today {
        ViewingState::Grace
    } else {
        ViewingState::Locked
    };

    Ok(DailySummary {
        day,
        state,
        minutes_watched,
        minutes_remaining,
        grace_consumed_today,
        daily_limit_minutes,
    })
}
