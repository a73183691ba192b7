//! Sentient Flappy Buddy - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `driver`: Frame-driven game loop and run lifecycle
//! - `input`: Maps key/pointer/touch events to the single activate action
//! - `snapshot`: Read-only view of a committed tick for presentation
//! - `tuning`: Data-driven game balance
//! - `viewport`: Viewport metrics with safe fallbacks
//! - `audio`: Scoring cue playback

pub mod audio;
pub mod driver;
pub mod input;
pub mod sim;
pub mod snapshot;
pub mod tuning;
pub mod viewport;

pub use driver::{FrameId, FrameScheduler, GameLoop, LoopEvent, ManualScheduler};
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};
pub use viewport::Viewport;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 1.4;
    /// Velocity set by a jump (pixels/tick, negative is up)
    pub const JUMP_VELOCITY: f32 = -16.0;

    /// Buddy defaults
    pub const BUDDY_START_Y: f32 = 300.0;
    pub const BUDDY_X: f32 = 140.0;
    pub const BUDDY_WIDTH: f32 = 80.0;
    pub const BUDDY_HEIGHT: f32 = 80.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 120.0;
    pub const PIPE_GAP: f32 = 280.0;
    /// Horizontal scroll per tick
    pub const PIPE_SPEED: f32 = 5.0;

    /// A pipe spawns once the spawn counter exceeds this many ticks
    pub const SPAWN_INTERVAL_TICKS: u32 = 100;
    /// Pipes enter this far right of the viewport edge
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// Pipes are retired this far past their own width beyond the left edge
    pub const RETIRE_MARGIN: f32 = 20.0;

    /// Gap placement range
    pub const MIN_GAP_TOP: f32 = 100.0;
    pub const GAP_BOTTOM_MARGIN: f32 = 120.0;
    /// Floor for the upper end of the gap range on short viewports
    pub const MIN_GAP_TOP_RANGE: f32 = 200.0;

    /// Render tilt clamp (degrees) and velocity factor
    pub const MAX_TILT_DEG: f32 = 25.0;
    pub const TILT_PER_VELOCITY: f32 = 2.0;
}
