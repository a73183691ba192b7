//! Collision and scoring
//!
//! Buddy and the pipes are axis-aligned boxes. A pipe is solid everywhere in
//! its column except the gap band `[gap_top, gap_top + gap]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{CrashKind, GameEvent, GamePhase, GameState, Pipe};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap on the x axis (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// True if `[min.y, max.y]` lies inside the band `[top, bottom]`
    #[inline]
    pub fn within_band_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y >= top && self.max.y <= bottom
    }
}

/// Horizontal extent of a pipe's column
pub fn pipe_column(pipe: &Pipe, width: f32) -> Rect {
    Rect::new(
        Vec2::new(pipe.x, f32::NEG_INFINITY),
        Vec2::new(pipe.right(width), f32::INFINITY),
    )
}

/// Does `buddy` touch the solid part of `pipe`?
pub fn hits_pipe(buddy: &Rect, pipe: &Pipe, tuning: &Tuning) -> bool {
    pipe_column(pipe, tuning.pipe_width).overlaps_x(buddy)
        && !buddy.within_band_y(pipe.gap_top, pipe.gap_bottom(tuning.pipe_gap))
}

/// Has Buddy reached the floor of the viewport?
#[inline]
pub fn hits_ground(buddy: &Rect, viewport: Viewport) -> bool {
    buddy.max.y >= viewport.height
}

/// Test Buddy against every pipe and the ground, award points for cleared
/// pipes, and latch game-over on any crash.
pub fn evaluate(
    state: &mut GameState,
    tuning: &Tuning,
    viewport: Viewport,
    events: &mut Vec<GameEvent>,
) {
    let buddy = state.buddy.bounds();
    let mut crash = None;

    for pipe in &mut state.pipes {
        if crash.is_none() && hits_pipe(&buddy, pipe, tuning) {
            crash = Some(CrashKind::Pipe { pipe_id: pipe.id });
        }

        if !pipe.passed && pipe.right(tuning.pipe_width) < buddy.min.x {
            pipe.passed = true;
            state.score += 1;
            log::info!("Cleared pipe {} - score {}", pipe.id, state.score);
            events.push(GameEvent::Scored {
                pipe_id: pipe.id,
                score: state.score,
            });
        }
    }

    if crash.is_none() && hits_ground(&buddy, viewport) {
        crash = Some(CrashKind::Ground);
    }

    if let Some(kind) = crash {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Crashed(kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 900.0,
    };

    fn state_with_pipe(pipe_x: f32, gap_top: f32, buddy_y: f32) -> (Tuning, GameState) {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let id = state.next_pipe_id();
        state.pipes.push(Pipe::new(id, pipe_x, gap_top));
        state.buddy.y = buddy_y;
        (tuning, state)
    }

    #[test]
    fn test_inside_gap_is_safe() {
        // Gap 200..480, buddy 250..330, columns overlap
        let (tuning, mut state) = state_with_pipe(100.0, 200.0, 250.0);
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(events.is_empty());
    }

    #[test]
    fn test_gap_edges_are_safe() {
        let (tuning, state) = state_with_pipe(100.0, 200.0, 200.0);
        assert!(!hits_pipe(&state.buddy.bounds(), &state.pipes[0], &tuning));

        // Bottom edge exactly at gap bottom (480)
        let (tuning, state) = state_with_pipe(100.0, 200.0, 400.0);
        assert!(!hits_pipe(&state.buddy.bounds(), &state.pipes[0], &tuning));
    }

    #[test]
    fn test_top_above_gap_collides() {
        let (tuning, mut state) = state_with_pipe(100.0, 200.0, 199.0);
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::Crashed(CrashKind::Pipe { pipe_id: 1 })]
        );
    }

    #[test]
    fn test_bottom_below_gap_collides() {
        let (tuning, state) = state_with_pipe(100.0, 200.0, 401.0);
        assert!(hits_pipe(&state.buddy.bounds(), &state.pipes[0], &tuning));
    }

    #[test]
    fn test_no_horizontal_overlap_is_safe() {
        // Pipe right edge touches buddy left edge exactly (20 + 120 = 140)
        let (tuning, state) = state_with_pipe(20.0, 500.0, 0.0);
        assert!(!hits_pipe(&state.buddy.bounds(), &state.pipes[0], &tuning));

        // Pipe left edge touches buddy right edge exactly (220)
        let (tuning, state) = state_with_pipe(220.0, 500.0, 0.0);
        assert!(!hits_pipe(&state.buddy.bounds(), &state.pipes[0], &tuning));
    }

    #[test]
    fn test_ground_collision_ignores_pipes() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.buddy.y = VIEW.height - state.buddy.height;
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert!(state.is_over());
        assert_eq!(events, vec![GameEvent::Crashed(CrashKind::Ground)]);
    }

    #[test]
    fn test_just_above_ground_is_safe() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.buddy.y = VIEW.height - state.buddy.height - 0.5;
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert!(!state.is_over());
    }

    #[test]
    fn test_score_once_per_pipe() {
        // Right edge 139 < buddy left 140
        let (tuning, mut state) = state_with_pipe(19.0, 500.0, 300.0);
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);
        assert_eq!(
            events,
            vec![GameEvent::Scored {
                pipe_id: 1,
                score: 1
            }]
        );

        events.clear();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert_eq!(state.score, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_right_edge_level_with_buddy_does_not_score() {
        let (tuning, mut state) = state_with_pipe(20.0, 500.0, 300.0);
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert_eq!(state.score, 0);
        assert!(!state.pipes[0].passed);
    }

    #[test]
    fn test_score_and_crash_same_tick() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        state.pipes.push(Pipe::new(1, 0.0, 500.0)); // cleared
        state.pipes.push(Pipe::new(2, 150.0, 500.0)); // overlapping, buddy above gap
        let mut events = Vec::new();
        evaluate(&mut state, &tuning, VIEW, &mut events);
        assert_eq!(state.score, 1);
        assert!(state.is_over());
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            GameEvent::Crashed(CrashKind::Pipe { pipe_id: 2 })
        );
    }
}
