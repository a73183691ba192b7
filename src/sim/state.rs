//! Game state and core simulation types
//!
//! Everything a run needs lives here; a reset replaces the whole `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks are being simulated
    Running,
    /// Run ended, waiting for a restart
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashKind {
    /// Hit the top or bottom segment of a pipe
    Pipe { pipe_id: u32 },
    /// Bottom edge reached the viewport floor
    Ground,
}

/// Things that happened during a tick, for presentation and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Buddy cleared a pipe; `score` is the new total
    Scored { pipe_id: u32, score: u32 },
    /// A new pipe entered from the right
    PipeSpawned { pipe_id: u32 },
    /// The run ended
    Crashed(CrashKind),
}

/// The player-controlled sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buddy {
    /// Top edge (pixels, origin top-left)
    pub y: f32,
    /// Vertical velocity (pixels/tick, negative is up)
    pub vel: f32,
    /// Fixed left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Buddy {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            y: tuning.buddy_start_y,
            vel: 0.0,
            x: tuning.buddy_x,
            width: tuning.buddy_width,
            height: tuning.buddy_height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.bottom()),
        )
    }
}

/// A pipe pair with a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom of the upper segment (top of the gap)
    pub gap_top: f32,
    /// Set once Buddy is fully past this pipe
    pub passed: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_top: f32) -> Self {
        Self {
            id,
            x,
            gap_top,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self, width: f32) -> f32 {
        self.x + width
    }

    #[inline]
    pub fn gap_bottom(&self, gap: f32) -> f32 {
        self.gap_top + gap
    }
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub buddy: Buddy,
    /// Live pipes in spawn order
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks since the last spawn
    pub spawn_counter: u32,
    /// Ticks simulated this run
    pub time_ticks: u64,
    /// Next pipe ID
    next_id: u32,
}

impl GameState {
    /// Fresh run with Buddy at its start position
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            buddy: Buddy::new(tuning),
            pipes: Vec::new(),
            score: 0,
            phase: GamePhase::Running,
            spawn_counter: 0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new pipe ID
    pub fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Set `vel` to the jump velocity. Ignored once the run is over.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_over() {
            return false;
        }
        super::physics::apply_jump(&mut self.buddy, tuning.jump_velocity);
        true
    }
}
