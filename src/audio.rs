//! Scoring cue
//!
//! One short chime per cleared pipe, restarted from the beginning if it is
//! still ringing. Playback problems are logged and dropped; they never reach
//! the game loop.

use thiserror::Error;

use crate::sim::GameEvent;

/// Why a cue could not be played
#[derive(Error, Debug)]
pub enum CueError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Something that can play the scoring cue
pub trait CuePlayer {
    /// Start the cue from the beginning, cutting off any earlier playback
    fn restart(&mut self) -> Result<(), CueError>;
}

/// Play the cue once per `Scored` event. Returns how many cues started.
pub fn play_score_cues<P: CuePlayer + ?Sized>(player: &mut P, events: &[GameEvent]) -> usize {
    let mut played = 0;
    for event in events {
        if !matches!(event, GameEvent::Scored { .. }) {
            continue;
        }
        match player.restart() {
            Ok(()) => played += 1,
            Err(e) => log::debug!("Score cue skipped: {}", e),
        }
    }
    played
}

#[cfg(target_arch = "wasm32")]
pub use web::ChimePlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use web_sys::{AudioContext, AudioContextState, OscillatorNode, OscillatorType};

    use super::{CueError, CuePlayer};

    fn js_err(e: JsValue) -> CueError {
        CueError::Playback(format!("{:?}", e))
    }

    const CHIME_GAIN: f32 = 0.24;

    /// Procedural "ting" on the Web Audio API - no asset file needed
    pub struct ChimePlayer {
        ctx: Option<AudioContext>,
        current: Option<OscillatorNode>,
    }

    impl Default for ChimePlayer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ChimePlayer {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, current: None }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }
    }

    impl CuePlayer for ChimePlayer {
        fn restart(&mut self) -> Result<(), CueError> {
            let ctx = self.ctx.as_ref().ok_or(CueError::Unavailable)?;
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if let Some(prev) = self.current.take() {
                let _ = prev.stop();
            }

            let osc = ctx.create_oscillator().map_err(js_err)?;
            let gain = ctx.create_gain().map_err(js_err)?;
            osc.set_type(OscillatorType::Sine);
            osc.connect_with_audio_node(&gain).map_err(js_err)?;
            let destination = ctx.destination();
            gain.connect_with_audio_node(&destination).map_err(js_err)?;

            let t = ctx.current_time();
            gain.gain().set_value_at_time(CHIME_GAIN, t).map_err(js_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .map_err(js_err)?;
            osc.frequency().set_value_at_time(1320.0, t).map_err(js_err)?;
            osc.frequency()
                .set_value_at_time(1760.0, t + 0.06)
                .map_err(js_err)?;

            osc.start().map_err(js_err)?;
            osc.stop_with_when(t + 0.3).map_err(js_err)?;
            self.current = Some(osc);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CrashKind;

    #[derive(Default)]
    struct CountingPlayer {
        restarts: usize,
    }

    impl CuePlayer for CountingPlayer {
        fn restart(&mut self) -> Result<(), CueError> {
            self.restarts += 1;
            Ok(())
        }
    }

    struct BrokenPlayer;

    impl CuePlayer for BrokenPlayer {
        fn restart(&mut self) -> Result<(), CueError> {
            Err(CueError::Playback("NotAllowedError".into()))
        }
    }

    #[test]
    fn test_one_cue_per_score() {
        let mut player = CountingPlayer::default();
        let events = [
            GameEvent::PipeSpawned { pipe_id: 3 },
            GameEvent::Scored {
                pipe_id: 1,
                score: 1,
            },
            GameEvent::Scored {
                pipe_id: 2,
                score: 2,
            },
            GameEvent::Crashed(CrashKind::Ground),
        ];
        assert_eq!(play_score_cues(&mut player, &events), 2);
        assert_eq!(player.restarts, 2);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let events = [GameEvent::Scored {
            pipe_id: 1,
            score: 1,
        }];
        assert_eq!(play_score_cues(&mut BrokenPlayer, &events), 0);
    }

    #[test]
    fn test_no_cue_without_score() {
        let mut player = CountingPlayer::default();
        assert_eq!(play_score_cues(&mut player, &[]), 0);
        assert_eq!(player.restarts, 0);
    }
}
