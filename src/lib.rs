//! Hand Dodge - a falling-obstacle survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (actor, obstacles, collisions, lifecycle)
//! - `driver`: Frame-paced clock that schedules simulation steps
//! - `engine`: Control surface tying the driver, simulation and input together
//! - `input`: Gesture input collaborator seam
//! - `config`: Data-driven game tuning

pub mod config;
pub mod driver;
pub mod engine;
pub mod input;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::{Frame, FrameDriver, FrameRequest};
pub use engine::{ControlHandle, Engine};
pub use input::{Gesture, GestureSource, InputError};
pub use sim::{Direction, GamePhase, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_Y: f32 = 550.0;
    pub const PLAYER_SPEED: f32 = 8.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Extra fall speed per level (applied at spawn time)
    pub const OBSTACLE_SPEED_PER_LEVEL: f32 = 0.5;
    pub const OBSTACLE_MIN_SIZE: f32 = 25.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 40.0;
    /// Obstacles enter above the visible field
    pub const OBSTACLE_SPAWN_Y: f32 = -30.0;
    /// Distance below the field before an obstacle is discarded
    pub const CULL_MARGIN: f32 = 50.0;

    /// Spawn chance per tick at level 0
    pub const SPAWN_RATE: f64 = 0.02;
    /// Extra spawn chance per level
    pub const SPAWN_RATE_PER_LEVEL: f64 = 0.001;
    pub const MAX_OBSTACLES: usize = 15;

    /// Progression
    pub const STARTING_LIVES: u8 = 3;
    /// Lives never exceed this
    pub const MAX_LIVES: u8 = 3;
    pub const MS_PER_POINT: f64 = 100.0;
    pub const POINTS_PER_LEVEL: u64 = 500;
}
