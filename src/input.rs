//! Gesture input collaborator seam
//!
//! A hand tracker reports the wrist and middle fingertip positions in
//! normalized image coordinates. Tilting the hand past a threshold steers the
//! actor. Any failure of the source degrades to [`Direction::None`]; the
//! simulation keeps running and the actor simply stops responding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::ControlHandle;
use crate::sim::Direction;

/// Horizontal tilt (normalized units) needed to register left/right
pub const TILT_THRESHOLD: f32 = 0.1;
/// Scales tilt into a [0, 1] confidence
pub const CONFIDENCE_GAIN: f32 = 5.0;

/// Errors reported by a gesture source
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Gesture source unavailable: {0}")]
    Unavailable(String),

    #[error("Gesture source disconnected")]
    Disconnected,
}

/// One reading from the gesture tracker
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gesture {
    pub direction: Direction,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
}

impl Gesture {
    /// No hand in view
    pub const NONE: Gesture = Gesture {
        direction: Direction::None,
        confidence: 0.0,
    };

    /// Classify a hand from its wrist and middle fingertip x (normalized)
    pub fn from_hand(wrist_x: f32, middle_tip_x: f32) -> Self {
        let dx = middle_tip_x - wrist_x;
        let direction = if dx < -TILT_THRESHOLD {
            Direction::Left
        } else if dx > TILT_THRESHOLD {
            Direction::Right
        } else {
            Direction::Center
        };
        Self {
            direction,
            confidence: (dx.abs() * CONFIDENCE_GAIN).min(1.0),
        }
    }

    /// Classify an optional detection; `None` means no hand was found
    pub fn from_detection(hand: Option<(f32, f32)>) -> Self {
        hand.map_or(Self::NONE, |(wrist_x, tip_x)| Self::from_hand(wrist_x, tip_x))
    }
}

/// Anything that can be polled for the latest gesture
pub trait GestureSource {
    fn poll(&mut self) -> Result<Gesture, InputError>;
}

impl<F> GestureSource for F
where
    F: FnMut() -> Result<Gesture, InputError>,
{
    fn poll(&mut self) -> Result<Gesture, InputError> {
        self()
    }
}

/// Pumps a gesture source into the engine at the source's own cadence
pub struct GestureFeed<S> {
    source: S,
    controls: ControlHandle,
    degraded: bool,
}

impl<S: GestureSource> GestureFeed<S> {
    pub fn new(source: S, controls: ControlHandle) -> Self {
        Self {
            source,
            controls,
            degraded: false,
        }
    }

    /// Whether the last poll failed
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Poll once and apply the direction. Failures read as no hand.
    pub fn pump(&mut self) -> Gesture {
        let gesture = match self.source.poll() {
            Ok(gesture) => {
                if self.degraded {
                    log::info!("Gesture source recovered");
                    self.degraded = false;
                }
                gesture
            }
            Err(e) => {
                if !self.degraded {
                    log::warn!("Gesture input degraded to none: {}", e);
                    self.degraded = true;
                }
                Gesture::NONE
            }
        };
        self.controls.move_player(gesture.direction);
        gesture
    }
}
