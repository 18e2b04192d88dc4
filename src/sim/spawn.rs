//! Obstacle spawning, movement and culling
//!
//! Spawning is one Bernoulli trial per tick, so the effective spawn rate
//! scales with frame rate. Difficulty tuning assumes a ~60 Hz display.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Obstacle, ObstacleColor};
use crate::config::GameConfig;

/// Chance of spawning an obstacle on one tick at the given level
pub fn spawn_probability(config: &GameConfig, level: u32) -> f64 {
    (config.spawn_rate + level as f64 * config.spawn_rate_per_level).clamp(0.0, 1.0)
}

/// Build a new obstacle above the field using the state's RNG
pub fn generate_obstacle(state: &mut GameState) -> Obstacle {
    let id = state.next_obstacle_id();
    let level = state.lifecycle().level();
    let config = &state.config;
    let (min_size, max_size) = (config.obstacle_min_size, config.obstacle_max_size);
    let field_width = config.field_width;
    let spawn_y = config.obstacle_spawn_y;
    let speed = config.obstacle_speed + level as f32 * config.obstacle_speed_per_level;

    let rng = state.rng();
    let size = Vec2::new(
        random_size(rng, min_size, max_size),
        random_size(rng, min_size, max_size),
    );
    let x = rng.random_range(0.0..=(field_width - size.x).max(0.0));
    let color = ObstacleColor::PALETTE[rng.random_range(0..ObstacleColor::PALETTE.len())];

    Obstacle {
        id,
        pos: Vec2::new(x, spawn_y),
        size,
        speed,
        color,
    }
}

fn random_size(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Roll this tick's spawn trial and add an obstacle on success.
///
/// Returns the new obstacle's ID, or `None` if the roll failed or the field is
/// already at capacity.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    let chance = spawn_probability(&state.config, state.lifecycle().level());
    if !state.rng().random_bool(chance) {
        return None;
    }
    if state.obstacles.len() >= state.config.max_obstacles {
        log::trace!("Spawn skipped, field full ({})", state.obstacles.len());
        return None;
    }
    let obstacle = generate_obstacle(state);
    let id = obstacle.id;
    log::debug!(
        "Spawned {} at x={:.1} speed={:.1}",
        obstacle.label(),
        obstacle.pos.x,
        obstacle.speed
    );
    state.obstacles.push(obstacle);
    Some(id)
}

/// Move every obstacle down by its own speed
pub fn advance_obstacles(obstacles: &mut [Obstacle]) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.y += obstacle.speed;
    }
}

/// Drop obstacles that fell past the bottom margin. Returns how many were removed.
pub fn cull_obstacles(obstacles: &mut Vec<Obstacle>, config: &GameConfig) -> usize {
    let before = obstacles.len();
    let cull_y = config.cull_y();
    obstacles.retain(|o| o.pos.y < cull_y);
    before - obstacles.len()
}
