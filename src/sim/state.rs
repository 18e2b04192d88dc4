//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives here. Lifecycle fields are
//! private: the transition methods on [`Lifecycle`] are the only mutators.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::GameConfig;

/// Steering signal for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Center,
    /// No hand detected
    #[default]
    None,
}

impl Direction {
    /// Apply one move of `speed` to `x`, keeping it inside `[0, max_x]`
    #[inline]
    pub fn apply(self, x: f32, speed: f32, max_x: f32) -> f32 {
        match self {
            Direction::Left => (x - speed).max(0.0),
            Direction::Right => (x + speed).min(max_x),
            Direction::Center | Direction::None => x,
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum GamePhase {
    /// No run in progress
    #[default]
    Idle = 0,
    /// Active gameplay
    Playing = 1,
    /// Run suspended, still counts as playing
    Paused = 2,
    /// Run ended (terminal until reset)
    GameOver = 3,
}

impl GamePhase {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => GamePhase::Playing,
            2 => GamePhase::Paused,
            3 => GamePhase::GameOver,
            _ => GamePhase::Idle,
        }
    }
}

/// The player-controlled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner in field coordinates
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Actor {
    /// Spawn centered at the bottom of the field
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_start_x(), config.player_y),
            size: Vec2::new(config.player_width, config.player_height),
            speed: config.player_speed,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move horizontally, clamped to the field
    pub fn steer(&mut self, direction: Direction, field_width: f32) {
        self.pos.x = direction.apply(self.pos.x, self.speed, field_width - self.size.x);
    }
}

/// Obstacle color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleColor {
    #[serde(rename = "#ff0080")]
    Magenta,
    #[serde(rename = "#00ff80")]
    Mint,
    #[serde(rename = "#8000ff")]
    Violet,
    #[serde(rename = "#ff8000")]
    Orange,
    #[serde(rename = "#0080ff")]
    Azure,
}

impl ObstacleColor {
    pub const PALETTE: [ObstacleColor; 5] = [
        ObstacleColor::Magenta,
        ObstacleColor::Mint,
        ObstacleColor::Violet,
        ObstacleColor::Orange,
        ObstacleColor::Azure,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            ObstacleColor::Magenta => "#ff0080",
            ObstacleColor::Mint => "#00ff80",
            ObstacleColor::Violet => "#8000ff",
            ObstacleColor::Orange => "#ff8000",
            ObstacleColor::Azure => "#0080ff",
        }
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner in field coordinates
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall distance per tick, fixed at spawn time
    pub speed: f32,
    pub color: ObstacleColor,
}

impl Obstacle {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Stable display key, e.g. `obstacle-7`
    pub fn label(&self) -> String {
        format!("obstacle-{}", self.id)
    }
}

/// Play/pause/game-over record with score and lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    phase: GamePhase,
    score: u64,
    lives: u8,
    level: u32,
    /// Clock time (ms) the run started
    start_time: f64,
    /// Clock time (ms) of the last progress update, relative to `start_time`
    elapsed_ms: f64,
}

impl Lifecycle {
    /// State before any run has started
    pub fn idle(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: config.starting_lives,
            level: 1,
            start_time: 0.0,
            elapsed_ms: 0.0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// True for a run in progress, paused or not
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True when frame steps should advance the simulation
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Begin a fresh run at `now`
    pub(crate) fn start(&mut self, config: &GameConfig, now: f64) {
        *self = Self {
            phase: GamePhase::Playing,
            start_time: now,
            ..Self::idle(config)
        };
    }

    /// Toggle pause. Returns false when there is no run to pause.
    pub(crate) fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::Idle | GamePhase::GameOver => return false,
        };
        true
    }

    /// Take one life. Returns true if that ended the run.
    pub(crate) fn lose_life(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            true
        } else {
            false
        }
    }

    /// Derive score and level from the time survived
    pub(crate) fn update_progress(&mut self, config: &GameConfig, now: f64) {
        if !self.is_running() {
            return;
        }
        let elapsed = (now - self.start_time).max(0.0);
        let score = (elapsed / config.ms_per_point).floor() as u64;
        // Clock jitter must never pull the score back down
        if score >= self.score {
            self.score = score;
            self.elapsed_ms = elapsed;
        }
        self.level = (self.score / config.points_per_level) as u32 + 1;
    }

    /// Abandon any run and return to idle
    pub(crate) fn reset(&mut self, config: &GameConfig) {
        *self = Self::idle(config);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created with
    pub seed: u64,
    rng: Pcg32,
    pub actor: Actor,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub(crate) lifecycle: Lifecycle,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            actor: Actor::spawn(&config),
            obstacles: Vec::with_capacity(config.max_obstacles),
            lifecycle: Lifecycle::idle(&config),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            next_id: 0,
            config,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a new run: fresh lifecycle, centered actor, empty field
    pub fn start(&mut self, now: f64) {
        self.lifecycle.start(&self.config, now);
        self.actor = Actor::spawn(&self.config);
        self.obstacles.clear();
        log::info!("Run started at {:.0} ms", now);
    }

    /// Toggle pause; no-op when idle or after game over
    pub fn toggle_pause(&mut self) -> bool {
        let toggled = self.lifecycle.toggle_pause();
        if toggled {
            log::info!(
                "{}",
                if self.lifecycle.is_paused() {
                    "Paused"
                } else {
                    "Resumed"
                }
            );
        }
        toggled
    }

    /// Restore the initial idle state
    pub fn reset(&mut self) {
        self.lifecycle.reset(&self.config);
        self.actor = Actor::spawn(&self.config);
        self.obstacles.clear();
        log::info!("Game reset");
    }

    /// Steer the actor directly, bypassing the engine's control handle
    #[cfg(test)]
    pub(crate) fn move_player(&mut self, direction: Direction) {
        if !self.lifecycle.is_running() {
            return;
        }
        self.actor.steer(direction, self.config.field_width);
    }
}
