//! Viewport metrics
//!
//! The browser viewport can be unavailable (non-interactive initialization,
//! detached documents). Callers always get usable dimensions.

use serde::{Deserialize, Serialize};

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Rendered height of the bottom pipe when the viewport is unknown
pub const FALLBACK_BOTTOM_PIPE_HEIGHT: f32 = 300.0;

impl Viewport {
    /// Safe default dimensions
    pub const FALLBACK: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Use measured metrics when present and sane, otherwise the fallback
    pub fn or_fallback(measured: Option<Viewport>) -> Viewport {
        match measured {
            Some(v) if v.is_usable() => v,
            _ => {
                log::debug!("Viewport unavailable, using {:?}", Self::FALLBACK);
                Self::FALLBACK
            }
        }
    }
}

/// Height of the bottom pipe segment as drawn, re-read against the current viewport
pub fn bottom_pipe_height(gap_top: f32, gap: f32, viewport: Option<Viewport>) -> f32 {
    match viewport {
        Some(v) => v.height - (gap_top + gap),
        None => FALLBACK_BOTTOM_PIPE_HEIGHT,
    }
}
