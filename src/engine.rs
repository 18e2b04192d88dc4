//! Engine control surface
//!
//! The engine owns the simulation state and the frame driver. Two entry points
//! mutate it:
//! - the frame path (`on_frame`), which owns obstacles and the lifecycle
//! - the input path (`ControlHandle::move_player`), which writes only the
//!   actor's x coordinate
//!
//! The input path may run on another thread. The phase and the actor x share
//! one atomic word, so a move is checked against the phase it lands in and can
//! never slip in after a pause or reset; a move that lands mid-frame is picked
//! up on the next frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{ConfigError, GameConfig};
use crate::driver::{FrameDriver, FrameRequest};
use crate::sim::{Direction, GamePhase, GameState, Lifecycle, Snapshot, StepOutcome, tick};

/// Phase in the high 32 bits, `f32` bits of the actor x in the low 32
#[inline]
fn pack(phase: GamePhase, x: f32) -> u64 {
    (u64::from(phase as u8) << 32) | u64::from(x.to_bits())
}

#[inline]
fn unpack(word: u64) -> (GamePhase, f32) {
    (GamePhase::from_u8((word >> 32) as u8), f32::from_bits(word as u32))
}

#[derive(Debug)]
struct SharedControls {
    word: AtomicU64,
    speed: f32,
    max_x: f32,
}

/// Cloneable, thread-safe handle for steering the actor
#[derive(Debug, Clone)]
pub struct ControlHandle {
    shared: Arc<SharedControls>,
}

impl ControlHandle {
    fn new(state: &GameState) -> Self {
        Self {
            shared: Arc::new(SharedControls {
                word: AtomicU64::new(pack(state.lifecycle().phase(), state.actor.pos.x)),
                speed: state.actor.speed,
                max_x: state.config.player_max_x(),
            }),
        }
    }

    /// Steer the actor. Ignored unless a run is active and unpaused.
    pub fn move_player(&self, direction: Direction) {
        if matches!(direction, Direction::Center | Direction::None) {
            return;
        }
        let (speed, max_x) = (self.shared.speed, self.shared.max_x);
        let result = self
            .shared
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                let (phase, x) = unpack(word);
                (phase == GamePhase::Playing)
                    .then(|| pack(phase, direction.apply(x, speed, max_x)))
            });
        if let Err(word) = result {
            log::trace!("Move {:?} ignored in {:?}", direction, unpack(word).0);
        }
    }

    /// Latest actor x, including moves not yet seen by a frame
    pub fn actor_x(&self) -> f32 {
        unpack(self.shared.word.load(Ordering::Acquire)).1
    }

    /// Phase as of the last engine transition
    pub fn phase(&self) -> GamePhase {
        unpack(self.shared.word.load(Ordering::Acquire)).0
    }

    /// Publish a phase and actor x together
    fn publish(&self, phase: GamePhase, x: f32) {
        self.shared.word.store(pack(phase, x), Ordering::Release);
    }

    /// Publish a phase, keeping whatever x the input path last wrote
    fn publish_phase(&self, phase: GamePhase) {
        let result = self
            .shared
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| {
                Some(pack(phase, unpack(word).1))
            });
        debug_assert!(result.is_ok());
    }
}

/// The simulation engine
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    driver: FrameDriver,
    controls: ControlHandle,
}

impl Engine {
    /// Build an idle engine. The seed drives all spawn randomness.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config, seed);
        let controls = ControlHandle::new(&state);
        log::debug!("Engine created with seed {}", seed);
        Ok(Self {
            state,
            driver: FrameDriver::new(),
            controls,
        })
    }

    /// Handle for the input path; may be sent to another thread
    pub fn controls(&self) -> ControlHandle {
        self.controls.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        self.state.lifecycle()
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    /// Request the host should fire on its next display refresh
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.driver.pending()
    }

    /// Start a run from idle and begin scheduling frames.
    ///
    /// Returns `None` (and changes nothing) if a run already exists; reset first.
    pub fn start_game(&mut self, now: f64) -> Option<FrameRequest> {
        if self.state.lifecycle().phase() != GamePhase::Idle {
            log::debug!("start_game ignored in {:?}", self.state.lifecycle().phase());
            return None;
        }
        self.state.start(now);
        self.controls.publish(self.state.lifecycle().phase(), self.state.actor.pos.x);
        Some(self.driver.start(now))
    }

    /// Toggle pause. Pausing stops the driver; resuming restarts it with a
    /// fresh baseline at `now`.
    pub fn pause_game(&mut self, now: f64) {
        if !self.state.toggle_pause() {
            log::debug!("pause_game ignored in {:?}", self.state.lifecycle().phase());
            return;
        }
        if self.state.lifecycle().is_paused() {
            self.driver.stop();
        } else {
            self.driver.start(now);
        }
        self.publish_phase();
    }

    /// Stop the driver and restore the initial idle state
    pub fn reset_game(&mut self) {
        self.driver.stop();
        self.state.reset();
        self.controls.publish(self.state.lifecycle().phase(), self.state.actor.pos.x);
    }

    /// Steer the actor (same as going through [`ControlHandle`])
    pub fn move_player(&self, direction: Direction) {
        self.controls.move_player(direction);
    }

    /// Display-refresh callback. Runs one step if `request` is still live.
    pub fn on_frame(&mut self, request: FrameRequest, now: f64) -> Option<StepOutcome> {
        let frame = self.driver.fire(request, now)?;
        log::trace!("Frame at {:.1} ms (dt {:.1} ms)", frame.now, frame.delta);

        self.state.actor.pos.x = self.controls.actor_x();
        let outcome = tick(&mut self.state, frame.now);

        if !self.state.lifecycle().is_running() {
            self.driver.stop();
            self.publish_phase();
        }
        Some(outcome)
    }

    /// Owned copy of the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::capture(&self.state);
        snapshot.actor.pos.x = self.controls.actor_x();
        snapshot
    }

    fn publish_phase(&self) {
        self.controls.publish_phase(self.state.lifecycle().phase());
    }
}
