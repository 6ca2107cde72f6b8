//! Variable-step simulation tick
//!
//! Dispatches on the current `GameMode`, applies the activate pulse, advances
//! the flyer, obstacles and particles, then resolves collisions and scoring.

use super::collision::{has_cleared, hits_obstacle, outside_play_area};
use super::rng::RandomSource;
use super::state::{GameEvent, GameMode, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Debounced activate pulse (flap / start / continue)
    pub activate: bool,
}

impl TickInput {
    pub fn activate() -> Self {
        Self { activate: true }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) {
    state.clock += dt;

    match state.mode {
        GameMode::Menu => {
            let menu = state.config.menu;
            let center_y = state.viewport.height / 2.0;
            state
                .flyer
                .hover(center_y, state.clock, menu.hover_amplitude, menu.hover_period);

            if input.activate {
                start_game(state);
            }
        }
        GameMode::Playing => {
            if input.activate {
                state.flyer.apply_impulse();
                state.push_event(GameEvent::Flap);
            }

            state.flyer.integrate(dt);
            state.obstacles.update(dt, state.viewport, rng);
            state.particles.update(dt);

            resolve_collisions(state, rng);
        }
        GameMode::GameOver => {
            if input.activate {
                reset_game(state);
            }
        }
    }
}

/// Menu -> Playing: fresh run that begins mid-flap
pub fn start_game(state: &mut GameState) {
    state.mode = GameMode::Playing;
    state.score = 0;
    state.reset_flyer();
    state.obstacles.reset();
    state.particles.clear();
    state.flyer.apply_impulse();
    state.push_event(GameEvent::Flap);
    log::debug!("Run started");
}

/// GameOver -> Menu (never straight back into play)
pub fn reset_game(state: &mut GameState) {
    state.mode = GameMode::Menu;
    state.reset_flyer();
    state.obstacles.reset();
    state.particles.clear();
    log::debug!("Back to menu");
}

/// Playing -> GameOver; the scene stays as it was for the game over screen
pub fn die(state: &mut GameState) {
    // Floor and pipe can both report a hit in the same tick
    if state.mode == GameMode::GameOver {
        return;
    }
    state.mode = GameMode::GameOver;

    let new_best = state.score > state.best_score;
    if new_best {
        state.best_score = state.score;
    }
    state.push_event(GameEvent::Crash {
        score: state.score,
        new_best,
    });
    log::info!("Game over: score {} (best {})", state.score, state.best_score);
}

/// Floor/ceiling and obstacle hits, plus scoring for cleared obstacles
fn resolve_collisions<R: RandomSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let bounds = state.flyer.bounds();
    let burst = state.config.particles;
    let mut hit = outside_play_area(&bounds, state.viewport.height);
    let mut cleared = Vec::new();
    for pair in state.obstacles.pairs_mut() {
        if hits_obstacle(&bounds, pair) {
            hit = true;
        }

        if !pair.passed && has_cleared(&bounds, pair) {
            pair.passed = true;
            cleared.push(pair.gap_center());
        }
    }

    // Points cleared this tick count toward the crash's final score
    for center in cleared {
        state.score += 1;
        let score = state.score;
        state.push_event(GameEvent::Score { score });
        state
            .particles
            .emit(center, burst.burst_count, burst.burst_color, rng);
        state.obstacles.accelerate();
    }

    if hit {
        die(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::obstacles::ObstaclePair;
    use crate::sim::rng::{ScriptedRandom, SeededRandom};
    use crate::sim::state::Viewport;

    fn new_state(height: f32) -> GameState {
        GameState::new(GameConfig::default(), Viewport::new(800.0, height), 0)
    }

    fn playing(height: f32) -> GameState {
        let mut state = new_state(height);
        start_game(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = new_state(600.0);
        let mut rng = ScriptedRandom::constant(0.5);

        // Idle ticks stay in the menu and just hover
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        assert_eq!(state.mode, GameMode::Menu);
        assert!((state.flyer.pos.y - 300.0).abs() <= 10.0);
        assert_eq!(state.flyer.rotation, 0.0);

        state.score = 9;
        tick(&mut state, &TickInput::activate(), 0.016, &mut rng);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.flyer.vel.y, -500.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Flap]);
    }

    #[test]
    fn test_end_to_end_first_spawn() {
        // Tall enough that 1.8s of free fall stays on screen
        let mut state = new_state(6000.0);
        let mut rng = ScriptedRandom::constant(0.5);

        tick(&mut state, &TickInput::activate(), 0.016, &mut rng);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.flyer.vel.y, -500.0);
        let start_y = state.flyer.pos.y;

        let dt = 0.016;
        let mut spawned_at = None;
        for i in 1..=113 {
            tick(&mut state, &TickInput::default(), dt, &mut rng);
            if spawned_at.is_none() && !state.obstacles.pairs().is_empty() {
                spawned_at = Some(i);
            }
        }

        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.obstacles.pairs().len(), 1);
        // 112 * 0.016 = 1.792 < 1.8 <= 113 * 0.016
        assert_eq!(spawned_at, Some(113));

        let expected_vel = -500.0 + 2000.0 * dt * 113.0;
        assert!((state.flyer.vel.y - expected_vel).abs() < 0.5);
        let mut y = start_y;
        let mut v = -500.0f32;
        for _ in 0..113 {
            v += 2000.0 * dt;
            y += v * dt;
        }
        assert!((state.flyer.pos.y - y).abs() < 0.5);
    }

    #[test]
    fn test_ceiling_collision_ends_run() {
        let mut state = playing(600.0);
        state.best_score = 2;
        state.score = 5;
        state.flyer.pos.y = -5.0;
        state.flyer.vel.y = 0.0;

        tick(&mut state, &TickInput::default(), 0.001, &mut ScriptedRandom::constant(0.0));
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.best_score, 5);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Crash {
                score: 5,
                new_best: true
            }]
        );
    }

    #[test]
    fn test_floor_collision_keeps_higher_best() {
        let mut state = playing(600.0);
        state.best_score = 10;
        state.score = 3;
        state.flyer.pos.y = 590.0;

        tick(&mut state, &TickInput::default(), 0.016, &mut ScriptedRandom::constant(0.0));
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.best_score, 10);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Crash {
                score: 3,
                new_best: false
            }]
        );
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = playing(600.0);
        state.flyer.vel.y = 0.0;
        state.flyer.pos.y = 300.0;
        // Gap 400..580, flyer box 280..320 is inside the top section's band
        state
            .obstacles
            .insert(ObstaclePair::new(90.0, 400.0, 180.0, 60.0));

        tick(&mut state, &TickInput::default(), 0.001, &mut ScriptedRandom::constant(0.0));
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_double_hit_crashes_once() {
        let mut state = playing(600.0);
        state.flyer.pos.y = -5.0;
        state
            .obstacles
            .insert(ObstaclePair::new(90.0, 400.0, 180.0, 60.0));

        tick(&mut state, &TickInput::default(), 0.001, &mut ScriptedRandom::constant(0.0));
        let crashes = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Crash { .. }))
            .count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_floor_hit_and_clear_in_same_tick() {
        let mut state = playing(600.0);
        state.flyer.pos.y = 590.0;
        // Right edge at 70, flyer left edge at 80
        state
            .obstacles
            .insert(ObstaclePair::new(10.0, 200.0, 180.0, 60.0));

        tick(&mut state, &TickInput::default(), 0.001, &mut ScriptedRandom::constant(0.5));
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.score, 1);
        assert_eq!(state.best_score, 1);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Score { score: 1 },
                GameEvent::Crash {
                    score: 1,
                    new_best: true
                },
            ]
        );
    }

    #[test]
    fn test_pipe_hit_and_other_clear_in_same_tick() {
        let mut state = playing(600.0);
        state.best_score = 3;
        state.score = 3;
        state.flyer.vel.y = 0.0;
        state.flyer.pos.y = 300.0;
        // Already behind the flyer
        state
            .obstacles
            .insert(ObstaclePair::new(10.0, 200.0, 180.0, 60.0));
        // Flyer box 280..320 runs into this one's top section
        state
            .obstacles
            .insert(ObstaclePair::new(90.0, 400.0, 180.0, 60.0));

        tick(&mut state, &TickInput::default(), 0.001, &mut ScriptedRandom::constant(0.5));
        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.score, 4);
        assert_eq!(state.best_score, 4);
        assert!(state.obstacles.pairs()[0].passed);
        assert!(!state.obstacles.pairs()[1].passed);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Score { score: 4 },
                GameEvent::Crash {
                    score: 4,
                    new_best: true
                },
            ]
        );
    }

    #[test]
    fn test_scoring_counts_each_pair_once() {
        let mut state = playing(600.0);
        state.flyer.vel.y = 0.0;
        state.flyer.pos.y = 300.0;
        // Right edge at 70, flyer left edge at 80
        state
            .obstacles
            .insert(ObstaclePair::new(10.0, 200.0, 180.0, 60.0));
        let mut rng = ScriptedRandom::constant(0.5);

        tick(&mut state, &TickInput::activate(), 0.001, &mut rng);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 1);
        assert!(state.obstacles.pairs()[0].passed);
        assert_eq!(state.obstacles.speed(), 205.0);
        assert_eq!(state.particles.len(), 15);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Flap, GameEvent::Score { score: 1 }]
        );

        for _ in 0..5 {
            tick(&mut state, &TickInput::activate(), 0.001, &mut rng);
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles.speed(), 205.0);
    }

    #[test]
    fn test_game_over_is_frozen_then_returns_to_menu() {
        let mut state = playing(600.0);
        state.flyer.pos.y = -5.0;
        let mut rng = ScriptedRandom::constant(0.5);
        tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        assert_eq!(state.mode, GameMode::GameOver);

        let frozen = state.flyer.pos;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 0.016, &mut rng);
        }
        assert_eq!(state.flyer.pos, frozen);
        assert_eq!(state.mode, GameMode::GameOver);

        tick(&mut state, &TickInput::activate(), 0.016, &mut rng);
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.flyer.pos.y, 300.0);
        assert!(state.obstacles.pairs().is_empty());
    }

    #[test]
    fn test_best_score_never_decreases() {
        let mut state = playing(600.0);
        let mut best = 0;
        for session in [4u32, 9, 2, 9, 0, 12] {
            start_game(&mut state);
            state.score = session;
            die(&mut state);
            best = best.max(session);
            assert_eq!(state.best_score, best);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(600.0);
        let mut b = playing(600.0);
        let mut rng_a = SeededRandom::new(99);
        let mut rng_b = SeededRandom::new(99);

        for i in 0..400 {
            let input = TickInput {
                activate: i % 18 == 0,
            };
            tick(&mut a, &input, 0.016, &mut rng_a);
            tick(&mut b, &input, 0.016, &mut rng_b);
        }

        assert_eq!(a.mode, b.mode);
        assert_eq!(a.score, b.score);
        assert_eq!(a.flyer.pos, b.flyer.pos);
        assert_eq!(a.obstacles.pairs(), b.obstacles.pairs());
    }
}
