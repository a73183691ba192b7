//! Read-only view of a committed tick
//!
//! The presentation layer draws from this and never touches `GameState`.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TILT_DEG, TILT_PER_VELOCITY};
use crate::sim::{GameState, Pipe};

/// Pipe as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub id: u32,
    pub x: f32,
    pub gap_top: f32,
    pub passed: bool,
}

impl From<&Pipe> for PipeView {
    fn from(pipe: &Pipe) -> Self {
        Self {
            id: pipe.id,
            x: pipe.x,
            gap_top: pipe.gap_top,
            passed: pipe.passed,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub buddy_y: f32,
    pub buddy_vel: f32,
    /// Sprite rotation in degrees (nose down is positive)
    pub tilt_deg: f32,
    pub pipes: Vec<PipeView>,
    pub score: u32,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            buddy_y: state.buddy.y,
            buddy_vel: state.buddy.vel,
            tilt_deg: tilt_for_velocity(state.buddy.vel),
            pipes: state.pipes.iter().map(PipeView::from).collect(),
            score: state.score,
            game_over: state.is_over(),
        }
    }
}

/// Rendered rotation for a vertical velocity
pub fn tilt_for_velocity(vel: f32) -> f32 {
    (vel * TILT_PER_VELOCITY).clamp(-MAX_TILT_DEG, MAX_TILT_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_tilt_clamped() {
        assert_eq!(tilt_for_velocity(-16.0), -25.0);
        assert_eq!(tilt_for_velocity(5.0), 10.0);
        assert_eq!(tilt_for_velocity(40.0), 25.0);
    }

    #[test]
    fn test_capture_reflects_state() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let id = state.next_pipe_id();
        state.pipes.push(Pipe::new(id, 640.0, 180.0));
        state.score = 3;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.buddy_y, 300.0);
        assert_eq!(snap.score, 3);
        assert!(!snap.game_over);
        assert_eq!(snap.pipes.len(), 1);
        assert_eq!(snap.pipes[0].gap_top, 180.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(&Tuning::default());
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"game_over\":false"));
    }
}
