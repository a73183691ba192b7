//! Demo controller that plays the game
//!
//! Used by the headless runner. It only ever decides whether to jump, so it
//! drives the run through the same activate path as a player.

use super::state::GameState;
use crate::tuning::Tuning;

/// Fraction of the gap (from its top) the autopilot steers toward
const AIM_FRACTION: f32 = 0.7;

/// Decide whether to jump before the next tick
pub fn should_jump(state: &GameState, tuning: &Tuning, floor: f32) -> bool {
    if state.is_over() {
        return false;
    }

    let buddy = &state.buddy;
    // Nearest pipe whose right edge is still ahead of Buddy's left edge
    let target = state
        .pipes
        .iter()
        .filter(|p| p.right(tuning.pipe_width) >= buddy.x)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|p| p.gap_top + tuning.pipe_gap * AIM_FRACTION)
        // No pipe in sight: hover around the middle of the screen
        .unwrap_or(floor * 0.5);

    // Predict next tick's bottom edge and only flap while falling past the aim
    let next_bottom = buddy.bottom() + buddy.vel + tuning.gravity;
    buddy.vel >= 0.0 && next_bottom > target
}
