//! Read-only view of the simulation for renderers and HUDs
//!
//! Snapshots are owned copies: nothing a consumer does to one can reach back
//! into the simulation.

use serde::Serialize;

use super::state::{Actor, GamePhase, GameState, Lifecycle, Obstacle};

/// Lifecycle flags and counters as the presentation layer sees them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleSnapshot {
    pub phase: GamePhase,
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_game_over: bool,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub start_time: f64,
    /// Time survived so far in this run (ms)
    pub survival_ms: f64,
}

impl From<&Lifecycle> for LifecycleSnapshot {
    fn from(life: &Lifecycle) -> Self {
        Self {
            phase: life.phase(),
            is_playing: life.is_playing(),
            is_paused: life.is_paused(),
            is_game_over: life.is_game_over(),
            score: life.score(),
            lives: life.lives(),
            level: life.level(),
            start_time: life.start_time(),
            survival_ms: life.elapsed_ms(),
        }
    }
}

impl LifecycleSnapshot {
    /// Survival time as `m:ss`
    pub fn survival_clock(&self) -> String {
        format_survival_time(self.survival_ms)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub actor: Actor,
    pub obstacles: Vec<Obstacle>,
    pub lifecycle: LifecycleSnapshot,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            actor: state.actor.clone(),
            obstacles: state.obstacles.clone(),
            lifecycle: LifecycleSnapshot::from(state.lifecycle()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Format milliseconds as `m:ss`
pub fn format_survival_time(ms: f64) -> String {
    let seconds = (ms.max(0.0) / 1000.0).floor() as u64;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::tick;

    #[test]
    fn test_format_survival_time() {
        assert_eq!(format_survival_time(0.0), "0:00");
        assert_eq!(format_survival_time(9_999.0), "0:09");
        assert_eq!(format_survival_time(61_000.0), "1:01");
        assert_eq!(format_survival_time(600_000.0), "10:00");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(GameConfig::default(), 11);
        state.start(1_000.0);
        tick(&mut state, 6_000.0);

        let snap = Snapshot::capture(&state);
        assert!(snap.lifecycle.is_playing);
        assert_eq!(snap.lifecycle.score, 50);
        assert_eq!(snap.lifecycle.survival_clock(), "0:05");
        assert_eq!(snap.obstacles.len(), state.obstacles.len());
        assert_eq!(snap.actor, state.actor);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut state = GameState::new(GameConfig::default(), 11);
        state.start(0.0);
        let mut snap = Snapshot::capture(&state);
        snap.actor.pos.x = 0.0;
        snap.obstacles.clear();
        assert_eq!(state.actor.pos.x, 380.0);
    }

    #[test]
    fn test_snapshot_json_uses_palette_hex() {
        use crate::sim::state::{Obstacle, ObstacleColor};
        use glam::Vec2;

        let mut state = GameState::new(GameConfig::default(), 11);
        state.start(0.0);
        state.obstacles.push(Obstacle {
            id: 3,
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::new(30.0, 30.0),
            speed: 3.5,
            color: ObstacleColor::Orange,
        });
        let json = Snapshot::capture(&state).to_json().expect("snapshot serializes");
        assert!(json.contains("\"#ff8000\""));
        assert!(json.contains("\"is_playing\":true"));
    }
}
