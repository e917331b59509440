//! Growth-progress advancement math.
//!
//! Progress is a 0-100 percentage toward maturity. Live ticks scale by the
//! environment multiplier; offline catch-up advances raw elapsed time only.

use crate::constants::MATURE_PROGRESS;

/// Progress gained over `delta_secs` for a plant with the given total growth
/// duration, scaled by the environment multiplier.
pub fn growth_increment(delta_secs: f64, growth_time_secs: u32, multiplier: f64) -> f64 {
    if growth_time_secs == 0 {
        return MATURE_PROGRESS;
    }
    (delta_secs / growth_time_secs as f64) * 100.0 * multiplier
}

/// Progress gained during offline catch-up. No environment multiplier is
/// applied here; the environment only scales the lump-sum yield.
pub fn offline_increment(offline_secs: f64, growth_time_secs: u32) -> f64 {
    growth_increment(offline_secs, growth_time_secs, 1.0)
}

/// Apply an increment, clamped to exactly 100. Progress never decreases.
pub fn advance(progress: f64, increment: f64) -> f64 {
    (progress + increment.max(0.0)).min(MATURE_PROGRESS)
}

/// A plot is mature (harvestable, rate-producing) once progress reaches 100.
pub fn is_mature(progress: f64) -> bool {
    progress >= MATURE_PROGRESS
}

/// Index into a plant's ordered stage list for the current progress.
pub fn stage_index(progress: f64, stage_count: usize) -> usize {
    if stage_count == 0 {
        return 0;
    }
    let raw = (progress / (100.0 / stage_count as f64)).floor() as usize;
    raw.min(stage_count - 1)
}
