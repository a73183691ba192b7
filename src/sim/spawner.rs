//! Pipe scrolling, retirement and spawning

use rand::Rng;

use super::state::{GameState, Pipe};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Inclusive range of `gap_top` values for a viewport height.
///
/// The upper bound keeps the gap above the bottom margin but never drops
/// below `min_gap_top_range`, even on tiny viewports.
pub fn gap_top_range(tuning: &Tuning, viewport_height: f32) -> (u32, u32) {
    let max = (viewport_height.floor() - tuning.pipe_gap - tuning.gap_bottom_margin)
        .max(tuning.min_gap_top_range);
    let lo = tuning.min_gap_top.max(0.0).ceil() as u32;
    let hi = (max.floor() as u32).max(lo);
    (lo, hi)
}

/// Draw a gap height uniformly from the integers in `gap_top_range`
pub fn roll_gap_top<R: Rng>(rng: &mut R, tuning: &Tuning, viewport_height: f32) -> f32 {
    let (lo, hi) = gap_top_range(tuning, viewport_height);
    rng.random_range(lo..=hi) as f32
}

/// Scroll and retire pipes, then spawn one if the interval elapsed.
///
/// Returns the ID of the pipe spawned this tick, if any.
pub fn step<R: Rng>(
    state: &mut GameState,
    tuning: &Tuning,
    viewport: Viewport,
    rng: &mut R,
) -> Option<u32> {
    let retire_x = tuning.retire_x();
    let before = state.pipes.len();
    state.pipes.retain_mut(|pipe| {
        pipe.x -= tuning.pipe_speed;
        pipe.x > retire_x
    });
    let retired = before - state.pipes.len();
    if retired > 0 {
        log::debug!("Retired {} pipe(s), {} live", retired, state.pipes.len());
    }

    state.spawn_counter += 1;
    if state.spawn_counter <= tuning.spawn_interval_ticks {
        return None;
    }
    state.spawn_counter = 0;

    let gap_top = roll_gap_top(rng, tuning, viewport.height);
    let id = state.next_pipe_id();
    let x = viewport.width + tuning.spawn_offset;
    state.pipes.push(Pipe::new(id, x, gap_top));
    log::debug!("Spawned pipe {} at x={} gap_top={}", id, x, gap_top);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Tuning, GameState) {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning);
        (tuning, state)
    }

    #[test]
    fn test_gap_range_tall_viewport() {
        let tuning = Tuning::default();
        assert_eq!(gap_top_range(&tuning, 1000.0), (100, 600));
        assert_eq!(gap_top_range(&tuning, 1000.9), (100, 600));
    }

    #[test]
    fn test_gap_range_floor_on_short_viewport() {
        let tuning = Tuning::default();
        assert_eq!(gap_top_range(&tuning, 300.0), (100, 200));
        assert_eq!(gap_top_range(&tuning, 0.0), (100, 200));
    }

    #[test]
    fn test_spawns_after_threshold() {
        let (tuning, mut state) = setup();
        let viewport = Viewport::new(800.0, 900.0);
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..tuning.spawn_interval_ticks {
            assert_eq!(step(&mut state, &tuning, viewport, &mut rng), None);
        }
        assert!(state.pipes.is_empty());

        let id = step(&mut state, &tuning, viewport, &mut rng).unwrap();
        assert_eq!(state.spawn_counter, 0);
        assert_eq!(state.pipes.len(), 1);
        let pipe = &state.pipes[0];
        assert_eq!(pipe.id, id);
        assert_eq!(pipe.x, 820.0);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_spawn_height_uses_injected_rng() {
        let (tuning, mut state) = setup();
        let viewport = Viewport::new(800.0, 900.0);
        state.spawn_counter = tuning.spawn_interval_ticks;

        let mut rng = Pcg32::seed_from_u64(42);
        let mut expected_rng = Pcg32::seed_from_u64(42);
        let expected = expected_rng.random_range(100u32..=500) as f32;

        step(&mut state, &tuning, viewport, &mut rng);
        assert_eq!(state.pipes[0].gap_top, expected);
    }

    #[test]
    fn test_scroll_and_retire() {
        let (tuning, mut state) = setup();
        let viewport = Viewport::new(800.0, 900.0);
        let mut rng = Pcg32::seed_from_u64(1);
        state.pipes.push(Pipe::new(1, 300.0, 150.0));
        state.pipes.push(Pipe::new(2, -135.0, 150.0));

        step(&mut state, &tuning, viewport, &mut rng);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].id, 1);
        assert_eq!(state.pipes[0].x, 295.0);
    }

    #[test]
    fn test_spawn_appends_after_existing() {
        let (tuning, mut state) = setup();
        let viewport = Viewport::new(800.0, 900.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let first = state.next_pipe_id();
        state.pipes.push(Pipe::new(first, 400.0, 150.0));
        state.spawn_counter = tuning.spawn_interval_ticks;

        let id = step(&mut state, &tuning, viewport, &mut rng).unwrap();
        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.pipes[1].id, id);
        assert!(state.pipes[0].x < state.pipes[1].x);
    }

    proptest! {
        #[test]
        fn prop_gap_top_within_range(seed in any::<u64>(), height in 0.0f32..3000.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let gap_top = roll_gap_top(&mut rng, &tuning, height);
            let max = (height.floor() - 280.0 - 120.0).max(200.0);
            prop_assert!(gap_top >= 100.0);
            prop_assert!(gap_top <= max);
            prop_assert_eq!(gap_top, gap_top.floor());
        }
    }
}
