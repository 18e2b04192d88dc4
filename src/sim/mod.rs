//! Simulation module
//!
//! All gameplay logic lives here:
//! - Time is passed in explicitly, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or input-device dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, actor_hits_obstacle, colliding_obstacles};
pub use snapshot::{LifecycleSnapshot, Snapshot, format_survival_time};
pub use spawn::{advance_obstacles, cull_obstacles, generate_obstacle, maybe_spawn, spawn_probability};
pub use state::{Actor, Direction, GamePhase, GameState, Lifecycle, Obstacle, ObstacleColor};
pub use tick::{StepOutcome, tick};
