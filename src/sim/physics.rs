//! Vertical integration for Buddy

use super::state::Buddy;

/// Advance one tick: `v += g`, then `y += v`.
///
/// Buddy cannot rise above the top edge. Reaching it kills all upward
/// momentum instead of bouncing.
pub fn integrate(buddy: &mut Buddy, gravity: f32) {
    buddy.vel += gravity;
    buddy.y += buddy.vel;

    if buddy.y < 0.0 {
        buddy.y = 0.0;
        buddy.vel = 0.0;
    }
}

/// Replace the current velocity with the jump velocity (never additive)
#[inline]
pub fn apply_jump(buddy: &mut Buddy, jump_velocity: f32) {
    buddy.vel = jump_velocity;
}
