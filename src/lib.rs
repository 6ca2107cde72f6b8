//! Flappy - a flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flyer physics, obstacles, particles, game flow)
//! - `renderer`: Drawing surface abstraction and scene composition
//! - `platform`: Frame loop driver, input edge detection, host errors
//! - `persistence`: Best score storage
//! - `config`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod color;
pub mod config;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use color::Color;
pub use config::GameConfig;
pub use highscores::BestScore;
pub use settings::Settings;

/// 2D vector used for every position and velocity in the game
pub use glam::Vec2;

/// Fixed constants that are not part of the tunable configuration
pub mod consts {
    /// Upper bound on a single simulation step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Target refresh rate the host loop is driven at (informational)
    pub const TARGET_HZ: f32 = 60.0;

    /// LocalStorage key for the best score
    pub const HIGH_SCORE_KEY: &str = "fb_highscore";
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
