//! Scoring module - points and gravity speed
//!
//! Scoring is deliberately small:
//! - every cleared line is worth 100 points, regardless of how many clear at once
//! - a hard drop is worth 2 points per row travelled
//!
//! Gravity speeds up by 100ms per 1000 points down to a 100ms floor. The
//! interval is always re-derived from the total score, so crossing the same
//! threshold twice can never apply the speed-up twice.

use crate::types::{
    DROP_INTERVAL_STEP_MS, HARD_DROP_POINTS_PER_CELL, INITIAL_DROP_INTERVAL_MS, LINE_CLEAR_POINTS,
    MIN_DROP_INTERVAL_MS, SPEED_UP_SCORE_STEP,
};

/// Points for clearing `lines` rows in a single lock
pub fn line_clear_score(lines: usize) -> u32 {
    (lines as u32).saturating_mul(LINE_CLEAR_POINTS)
}

/// Points for a hard drop over `distance` rows
pub fn hard_drop_score(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_CELL)
}

/// Gravity interval (ms per row) for a given total score
pub fn drop_interval_for_score(score: u32) -> u32 {
    let steps = score / SPEED_UP_SCORE_STEP;
    INITIAL_DROP_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(MIN_DROP_INTERVAL_MS)
}
