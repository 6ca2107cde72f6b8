//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; nothing here touches
//! the platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Flyer;
use super::obstacles::ObstacleManager;
use super::particles::ParticlePool;
use crate::config::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, flyer hovers in place
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended, scene frozen until the next activate pulse
    GameOver,
}

/// Something the platform layer should react to (sound, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Flyer flapped (including the opening flap of a run)
    Flap,
    /// An obstacle was cleared; carries the new score
    Score { score: u32 },
    /// Run ended
    Crash { score: u32, new_best: bool },
}

/// Size of the play area in surface units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Complete game state (deterministic given the same inputs and random source)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub mode: GameMode,
    /// Obstacles cleared this run
    pub score: u32,
    /// Best score across runs (never decreases)
    pub best_score: u32,
    pub flyer: Flyer,
    pub obstacles: ObstacleManager,
    pub particles: ParticlePool,
    /// Simulated seconds since creation, drives the menu hover
    pub clock: f32,
    /// Events raised since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: GameConfig, viewport: Viewport, best_score: u32) -> Self {
        let start = Vec2::new(config.flyer.start_x, viewport.height / 2.0);
        Self {
            config,
            viewport,
            mode: GameMode::Menu,
            score: 0,
            best_score,
            flyer: Flyer::new(config.flyer, start),
            obstacles: ObstacleManager::new(config.obstacles),
            particles: ParticlePool::new(config.particles),
            clock: 0.0,
            events: Vec::new(),
        }
    }

    /// Host surface changed size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Put the flyer back at its starting pose
    pub fn reset_flyer(&mut self) {
        let x = self.config.flyer.start_x;
        let y = self.viewport.height / 2.0;
        self.flyer.reset_to(x, y);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_in_menu() {
        let state = GameState::new(GameConfig::default(), Viewport::new(800.0, 600.0), 7);
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 7);
        assert_eq!(state.flyer.pos, Vec2::new(100.0, 300.0));
        assert!(state.obstacles.pairs().is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(GameConfig::default(), Viewport::new(800.0, 600.0), 0);
        state.push_event(GameEvent::Flap);
        state.push_event(GameEvent::Score { score: 1 });
        assert_eq!(state.pending_events().len(), 2);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Flap, GameEvent::Score { score: 1 }]
        );
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_resize_moves_reset_pose() {
        let mut state = GameState::new(GameConfig::default(), Viewport::new(800.0, 600.0), 0);
        state.resize(Viewport::new(400.0, 1000.0));
        state.reset_flyer();
        assert_eq!(state.flyer.pos, Vec2::new(100.0, 500.0));
        assert_eq!(state.viewport.center(), Vec2::new(200.0, 500.0));
    }
}
