//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed order (integrate, spawn, evaluate)
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, evaluate, hits_ground, hits_pipe};
pub use state::{Buddy, CrashKind, GameEvent, GamePhase, GameState, Pipe};
pub use tick::tick;
