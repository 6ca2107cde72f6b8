//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - dt supplied by the caller (already clamped by the loop driver)
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (insertion order for obstacles and particles)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod obstacles;
pub mod particles;
pub mod rng;
pub mod state;
pub mod tick;

pub use actor::Flyer;
pub use collision::{Aabb, has_cleared, hits_obstacle, outside_play_area};
pub use obstacles::{ObstacleManager, ObstaclePair};
pub use particles::{Particle, ParticlePool};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{GameEvent, GameMode, GameState, Viewport};
pub use tick::{TickInput, die, reset_game, start_game, tick};
