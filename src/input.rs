//! Input mapping
//!
//! Every source produces the same payload-less activate signal. What it does
//! (jump or restart) is decided by the driver from the run phase.

/// Where an activation came from (for logging only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Pointer,
    Touch,
}

/// The designated jump key (`KeyboardEvent.code`)
pub const JUMP_KEY_CODE: &str = "Space";

/// Map a keyboard `code` to an activation. Other keys are ignored.
pub fn activation_for_key(code: &str) -> Option<InputSource> {
    (code == JUMP_KEY_CODE).then_some(InputSource::Keyboard)
}

/// What an activation resolves to for the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Restart,
}

/// Mid-run activations jump; after game over they restart
pub fn resolve(game_over: bool) -> Action {
    if game_over {
        Action::Restart
    } else {
        Action::Jump
    }
}
