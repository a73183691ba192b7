//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from JSON. Missing fields keep
//! their defaults from `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("malformed tuning JSON")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    #[error("tuning value `{field}` must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("tuning value `{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("gravity must not be negative (got {0})")]
    NegativeGravity(f32),
    #[error("buddy must start on screen (got start y {0})")]
    StartAboveTop(f32),
    #[error("jump velocity must point upward (got {0})")]
    JumpNotUpward(f32),
    #[error("min_gap_top ({min}) is above the range floor ({floor})")]
    EmptyGapRange { min: f32, floor: f32 },
}

/// Gameplay constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub buddy_start_y: f32,
    pub buddy_x: f32,
    pub buddy_width: f32,
    pub buddy_height: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    pub spawn_interval_ticks: u32,
    pub spawn_offset: f32,
    pub retire_margin: f32,
    pub min_gap_top: f32,
    pub gap_bottom_margin: f32,
    pub min_gap_top_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            buddy_start_y: BUDDY_START_Y,
            buddy_x: BUDDY_X,
            buddy_width: BUDDY_WIDTH,
            buddy_height: BUDDY_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            spawn_offset: SPAWN_OFFSET,
            retire_margin: RETIRE_MARGIN,
            min_gap_top: MIN_GAP_TOP,
            gap_bottom_margin: GAP_BOTTOM_MARGIN,
            min_gap_top_range: MIN_GAP_TOP_RANGE,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let values = [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("buddy_start_y", self.buddy_start_y),
            ("buddy_x", self.buddy_x),
            ("buddy_width", self.buddy_width),
            ("buddy_height", self.buddy_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
            ("spawn_offset", self.spawn_offset),
            ("retire_margin", self.retire_margin),
            ("min_gap_top", self.min_gap_top),
            ("gap_bottom_margin", self.gap_bottom_margin),
            ("min_gap_top_range", self.min_gap_top_range),
        ];
        // Out-of-range JSON numbers deserialize to infinity
        if let Some((field, value)) = values.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::NotFinite { field, value });
        }

        let sizes = [
            ("buddy_width", self.buddy_width),
            ("buddy_height", self.buddy_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
        ];
        for (field, value) in sizes {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        if self.buddy_start_y < 0.0 {
            return Err(TuningError::StartAboveTop(self.buddy_start_y));
        }
        if self.gravity < 0.0 {
            return Err(TuningError::NegativeGravity(self.gravity));
        }
        if self.jump_velocity >= 0.0 {
            return Err(TuningError::JumpNotUpward(self.jump_velocity));
        }
        if self.min_gap_top > self.min_gap_top_range {
            return Err(TuningError::EmptyGapRange {
                min: self.min_gap_top,
                floor: self.min_gap_top_range,
            });
        }
        Ok(())
    }

    /// X coordinate at or beyond which a pipe is retired
    #[inline]
    pub fn retire_x(&self) -> f32 {
        -(self.pipe_width + self.retire_margin)
    }
}
