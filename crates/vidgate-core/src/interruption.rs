//! Continue-vs-interrupt decision for in-progress playback
//!
//! A started video gets one fixed grace window past the remaining budget so
//! it can finish instead of being cut off mid-play. The decision is made
//! once, against the budget snapshot taken when playback started; callers
//! cache it for that playback's lifetime. Re-evaluating against a shrinking
//! budget on every poll would flip the answer partway through.

use vidgate_config::INTERRUPT_GRACE_MINUTES;

/// Whether an in-progress video must be interrupted.
///
/// `false` when the video fits in the remaining budget plus the fixed
/// grace window.
pub fn should_interrupt(minutes_remaining: u32, video_duration_minutes: u32) -> bool {
    video_duration_minutes > minutes_remaining + INTERRUPT_GRACE_MINUTES
}

/// A video's length in whole minutes for the interruption check.
/// Rounds up: a 6m10s video needs 7 minutes to finish.
pub fn video_duration_minutes(duration_seconds: u32) -> u32 {
    duration_seconds.div_ceil(60)
}
