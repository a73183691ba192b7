//! Per-frame simulation tick
//!
//! Runs the integrator, spawner and evaluator in that order.

use rand::Rng;

use super::state::{GameEvent, GameState};
use super::{collision, physics, spawner};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Advance the run by one tick and return what happened.
///
/// Does nothing once the run is over.
pub fn tick<R: Rng>(
    state: &mut GameState,
    tuning: &Tuning,
    viewport: Viewport,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }

    state.time_ticks += 1;

    physics::integrate(&mut state.buddy, tuning.gravity);

    if let Some(pipe_id) = spawner::step(state, tuning, viewport, rng) {
        events.push(GameEvent::PipeSpawned { pipe_id });
    }

    collision::evaluate(state, tuning, viewport, &mut events);

    events
}
