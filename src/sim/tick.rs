//! Per-frame simulation step
//!
//! Order within a step: spawn, advance, cull, derive score and level from the
//! clock, then collide. Progress is taken before a final hit freezes it. Time is always passed in; nothing here reads a clock.

use super::collision::colliding_obstacles;
use super::spawn::{advance_obstacles, cull_obstacles, maybe_spawn};
use super::state::GameState;

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Whether the step ran at all (false while idle, paused or over)
    pub advanced: bool,
    /// ID of the obstacle spawned this step
    pub spawned: Option<u32>,
    /// Obstacles that fell off the field
    pub culled: usize,
    /// Obstacles removed by hitting the actor, in spawn order
    pub hits: Vec<u32>,
    /// A life was taken this step
    pub life_lost: bool,
    /// This step ended the run
    pub game_over: bool,
}

/// Advance the simulation by one frame at clock time `now` (ms)
pub fn tick(state: &mut GameState, now: f64) -> StepOutcome {
    // Don't tick unless actively playing
    if !state.lifecycle().is_running() {
        return StepOutcome::default();
    }

    let mut outcome = StepOutcome {
        advanced: true,
        ..Default::default()
    };

    outcome.spawned = maybe_spawn(state);
    advance_obstacles(&mut state.obstacles);
    outcome.culled = cull_obstacles(&mut state.obstacles, &state.config);
    if outcome.culled > 0 {
        log::trace!("Culled {} obstacles", outcome.culled);
    }

    state.lifecycle.update_progress(&state.config, now);

    let hits = colliding_obstacles(&state.actor, &state.obstacles);
    if !hits.is_empty() {
        state.obstacles.retain(|o| !hits.contains(&o.id));
        // One life per step no matter how many obstacles hit at once
        outcome.life_lost = true;
        outcome.game_over = state.lifecycle.lose_life();
        log::info!(
            "Hit by {} obstacle(s), {} lives left",
            hits.len(),
            state.lifecycle().lives()
        );
        if outcome.game_over {
            log::info!("Game over with score {}", state.lifecycle().score());
        }
        outcome.hits = hits;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::{Direction, GamePhase, Obstacle, ObstacleColor};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Config with spawning disabled so tests control the field
    fn quiet_config() -> GameConfig {
        GameConfig {
            spawn_rate: 0.0,
            spawn_rate_per_level: 0.0,
            ..GameConfig::default()
        }
    }

    /// Place an obstacle right above the actor so the next advance overlaps it
    fn drop_on_actor(state: &mut GameState) -> u32 {
        let id = state.next_obstacle_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(state.actor.pos.x, state.actor.pos.y - 30.0),
            size: Vec2::new(30.0, 30.0),
            speed: 5.0,
            color: ObstacleColor::Azure,
        });
        id
    }

    #[test]
    fn test_tick_idle_does_nothing() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let outcome = tick(&mut state, 10_000.0);
        assert!(!outcome.advanced);
        assert_eq!(state.lifecycle().score(), 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_score_scenario() {
        let mut state = GameState::new(quiet_config(), 1);
        state.start(0.0);
        tick(&mut state, 50_000.0);
        assert_eq!(state.lifecycle().score(), 500);
        assert_eq!(state.lifecycle().level(), 2);
    }

    #[test]
    fn test_paused_tick_freezes_everything() {
        let mut state = GameState::new(quiet_config(), 1);
        state.start(0.0);
        drop_on_actor(&mut state);
        state.toggle_pause();
        let before_y = state.obstacles[0].pos.y;

        let outcome = tick(&mut state, 5_000.0);
        assert!(!outcome.advanced);
        assert_eq!(state.obstacles[0].pos.y, before_y);
        assert_eq!(state.lifecycle().score(), 0);
        assert_eq!(state.lifecycle().lives(), 3);
    }

    #[test]
    fn test_collision_costs_one_life_and_removes_obstacle() {
        let mut state = GameState::new(quiet_config(), 1);
        state.start(0.0);
        let id = drop_on_actor(&mut state);

        let outcome = tick(&mut state, 16.0);
        assert_eq!(outcome.hits, vec![id]);
        assert!(outcome.life_lost);
        assert!(!outcome.game_over);
        assert_eq!(state.lifecycle().lives(), 2);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.lifecycle().phase(), GamePhase::Playing);
    }

    #[test]
    fn test_simultaneous_hits_cost_one_life() {
        let mut state = GameState::new(quiet_config(), 1);
        state.start(0.0);
        let a = drop_on_actor(&mut state);
        let b = drop_on_actor(&mut state);
        let c = drop_on_actor(&mut state);

        let outcome = tick(&mut state, 16.0);
        assert_eq!(outcome.hits, vec![a, b, c]);
        assert_eq!(state.lifecycle().lives(), 2);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_third_hit_ends_the_run() {
        let mut state = GameState::new(quiet_config(), 1);
        state.start(0.0);
        let mut now = 0.0;
        for expected_lives in [2u8, 1, 0] {
            drop_on_actor(&mut state);
            now += 16.0;
            tick(&mut state, now);
            assert_eq!(state.lifecycle().lives(), expected_lives);
        }
        let life = state.lifecycle();
        assert!(life.is_game_over());
        assert!(!life.is_playing());

        // Score is frozen once the run is over
        let score = life.score();
        let outcome = tick(&mut state, 60_000.0);
        assert!(!outcome.advanced);
        assert_eq!(state.lifecycle().score(), score);
    }

    #[test]
    fn test_final_hit_still_counts_survival_time() {
        let config = GameConfig {
            starting_lives: 1,
            ..quiet_config()
        };
        let mut state = GameState::new(config, 1);
        state.start(0.0);
        tick(&mut state, 10_000.0);
        assert_eq!(state.lifecycle().score(), 100);

        drop_on_actor(&mut state);
        let outcome = tick(&mut state, 50_000.0);
        assert!(outcome.game_over);
        assert_eq!(state.lifecycle().score(), 500);
        assert_eq!(state.lifecycle().level(), 2);
        assert_eq!(state.lifecycle().elapsed_ms(), 50_000.0);
    }

    #[test]
    fn test_obstacle_keeps_spawn_speed_after_level_up() {
        let config = GameConfig {
            spawn_rate: 1.0,
            max_obstacles: 1,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 5);
        state.start(0.0);
        tick(&mut state, 16.0);
        let speed = state.obstacles[0].speed;
        assert_eq!(speed, 3.5);

        // Level up
        tick(&mut state, 50_016.0);
        assert_eq!(state.lifecycle().level(), 2);
        assert_eq!(state.obstacles[0].speed, speed);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(GameConfig::default(), 99999);
        let mut state2 = GameState::new(GameConfig::default(), 99999);
        state1.start(0.0);
        state2.start(0.0);

        let moves = [Direction::Left, Direction::Right, Direction::None];
        for frame in 0..600u32 {
            let direction = moves[(frame / 20) as usize % moves.len()];
            state1.move_player(direction);
            state2.move_player(direction);
            let now = frame as f64 * 16.0;
            assert_eq!(tick(&mut state1, now), tick(&mut state2, now));
        }

        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.lifecycle(), state2.lifecycle());
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_every_step(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0u8..4, 1..400),
        ) {
            let config = GameConfig {
                spawn_rate: 0.2,
                ..GameConfig::default()
            };
            let mut state = GameState::new(config, seed);
            state.start(0.0);
            let mut lives = state.lifecycle().lives();

            for (frame, m) in moves.iter().enumerate() {
                let direction = match m {
                    0 => Direction::Left,
                    1 => Direction::Right,
                    2 => Direction::Center,
                    _ => Direction::None,
                };
                state.move_player(direction);
                let outcome = tick(&mut state, frame as f64 * 250.0);
                let life = state.lifecycle();

                prop_assert!(state.actor.pos.x >= 0.0);
                prop_assert!(state.actor.pos.x <= state.config.player_max_x());
                prop_assert!(state.obstacles.len() <= state.config.max_obstacles);
                prop_assert!(state.obstacles.iter().all(|o| o.pos.y < state.config.cull_y()));
                prop_assert_eq!(life.is_game_over(), life.lives() == 0);
                prop_assert!(!(life.is_game_over() && life.is_playing()));
                prop_assert_eq!(u64::from(life.level()), life.score() / 500 + 1);
                prop_assert!(life.lives() <= crate::consts::MAX_LIVES);

                let expected = if outcome.life_lost { lives - 1 } else { lives };
                prop_assert_eq!(life.lives(), expected);
                lives = life.lives();
            }
        }
    }
}
