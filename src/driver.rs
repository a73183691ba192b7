//! Frame-driven game loop
//!
//! The loop owns the run state and processes a FIFO queue of frame, activate
//! and reset events one at a time. A frame is only requested after the
//! previous tick has finished, so ticks never overlap. Every request carries a
//! fresh `FrameId` and only the frame matching the outstanding request ticks.

use std::collections::VecDeque;

use rand::Rng;

use crate::input::{Action, InputSource, resolve};
use crate::sim::{GameEvent, GameState, tick};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Token tying a delivered frame to the request that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Events consumed by the loop, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// The host is ready to render; run one tick
    Frame(FrameId),
    /// Player pressed the jump key, clicked or tapped
    Activate(InputSource),
    /// Start a fresh run
    Reset,
}

/// "Run once on the next display refresh" primitive
pub trait FrameScheduler {
    /// Request exactly one `LoopEvent::Frame` carrying `id`
    fn request_frame(&mut self, id: FrameId);
    /// Drop a pending request before it fires
    fn cancel_frame(&mut self);
}

/// Scheduler for headless runs and tests: the caller fires frames itself
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<FrameId>,
    pub requests: u64,
    pub cancels: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending request, if any
    pub fn fire(&mut self) -> Option<FrameId> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, id: FrameId) {
        self.pending = Some(id);
        self.requests += 1;
    }

    fn cancel_frame(&mut self) {
        if self.pending.take().is_some() {
            self.cancels += 1;
        }
    }
}

/// Game loop driver: Running until a crash, GameOver until a reset
pub struct GameLoop<R, S> {
    state: GameState,
    tuning: Tuning,
    rng: R,
    scheduler: S,
    queue: VecDeque<LoopEvent>,
    pending_frame: Option<FrameId>,
    next_frame: u64,
    runs: u32,
}

impl<R: Rng, S: FrameScheduler> GameLoop<R, S> {
    /// Create an idle loop. Nothing ticks until the first `Reset`.
    pub fn new(tuning: Tuning, rng: R, scheduler: S) -> Self {
        Self {
            state: GameState::new(&tuning),
            tuning,
            rng,
            scheduler,
            queue: VecDeque::new(),
            pending_frame: None,
            next_frame: 0,
            runs: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Number of runs started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn is_frame_pending(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Committed state for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Queue an event without processing it
    pub fn push(&mut self, event: LoopEvent) {
        self.queue.push_back(event);
    }

    /// Queue an event and process everything pending
    pub fn dispatch(&mut self, event: LoopEvent, viewport: Option<Viewport>) -> Vec<GameEvent> {
        self.push(event);
        self.process(viewport)
    }

    /// Drain the queue in arrival order, returning all simulation events
    pub fn process(&mut self, viewport: Option<Viewport>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            match event {
                LoopEvent::Frame(id) => events.extend(self.on_frame(id, viewport)),
                LoopEvent::Activate(source) => self.on_activate(source),
                LoopEvent::Reset => self.reset(),
            }
        }
        events
    }

    fn on_frame(&mut self, id: FrameId, viewport: Option<Viewport>) -> Vec<GameEvent> {
        // Stale, cancelled or duplicate frames are dropped
        if self.pending_frame != Some(id) {
            log::debug!("Ignoring unrequested frame {:?}", id);
            return Vec::new();
        }
        self.pending_frame = None;

        if self.state.is_over() {
            return Vec::new();
        }

        let viewport = Viewport::or_fallback(viewport);
        let events = tick(&mut self.state, &self.tuning, viewport, &mut self.rng);

        if self.state.is_over() {
            log::info!(
                "Game over after {} ticks - score {}",
                self.state.time_ticks,
                self.state.score
            );
        } else {
            self.schedule_frame();
        }
        events
    }

    fn on_activate(&mut self, source: InputSource) {
        if self.runs == 0 {
            log::debug!("Ignoring {:?} activation before the first run", source);
            return;
        }
        match resolve(self.state.is_over()) {
            Action::Jump => {
                self.state.jump(&self.tuning);
            }
            Action::Restart => {
                log::debug!("Restart requested via {:?}", source);
                self.reset();
            }
        }
    }

    /// Replace the run state and schedule the first tick of the new run
    fn reset(&mut self) {
        if self.pending_frame.take().is_some() {
            self.scheduler.cancel_frame();
        }
        self.state = GameState::new(&self.tuning);
        self.runs += 1;
        log::info!("Run {} started", self.runs);
        self.schedule_frame();
    }

    fn schedule_frame(&mut self) {
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.scheduler.request_frame(id);
        self.pending_frame = Some(id);
    }
}
