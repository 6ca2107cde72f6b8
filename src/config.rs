//! Data-driven game balance
//!
//! Every tunable number lives here so tests can build tiny arenas,
//! instant spawns, or weightless flyers without touching the simulation code.
//! Each component keeps a copy of its own section.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::consts::MAX_FRAME_DT;

/// Configuration loading/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Flyer physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative is up)
    pub flap_velocity: f32,
    /// Rotation snapped to on a flap (radians)
    pub flap_tilt: f32,
    /// Rotation per unit of vertical velocity
    pub rotation_gain: f32,
    /// Rotation is clamped to ±max_rotation
    pub max_rotation: f32,
    pub radius: f32,
    /// Fixed horizontal position of the flyer
    pub start_x: f32,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        Self {
            gravity: 2000.0,
            flap_velocity: -500.0,
            flap_tilt: -std::f32::consts::FRAC_PI_4,
            rotation_gain: 0.002,
            max_rotation: std::f32::consts::FRAC_PI_4,
            radius: 20.0,
            start_x: 100.0,
        }
    }
}

/// Obstacle spawning and scrolling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub width: f32,
    /// Vertical clearance between top and bottom sections
    pub gap: f32,
    /// Minimum height of either section
    pub min_height: f32,
    /// Scroll speed at the start of a run (units/s)
    pub base_speed: f32,
    /// Scroll speed added per cleared obstacle
    pub speed_increment: f32,
    /// Spawn this far past the right edge of the play area
    pub spawn_offset: f32,
    /// Retire once the right edge is this far left of the origin
    pub despawn_margin: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.8,
            width: 60.0,
            gap: 180.0,
            min_height: 50.0,
            base_speed: 200.0,
            speed_increment: 5.0,
            spawn_offset: 50.0,
            despawn_margin: 100.0,
        }
    }
}

/// Decorative particle bursts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per scoring burst
    pub burst_count: usize,
    pub burst_color: Color,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Life lost per second (life starts at 1.0)
    pub decay_rate: f32,
    /// Downward acceleration applied to particles
    pub gravity: f32,
    /// Pool capacity, oldest particles are dropped past this
    pub max_particles: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst_count: 15,
            burst_color: Color::GOLD,
            min_speed: 50.0,
            max_speed: 150.0,
            min_size: 2.0,
            max_size: 6.0,
            decay_rate: 2.0,
            gravity: 500.0,
            max_particles: 256,
        }
    }
}

/// Title screen hover animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub hover_amplitude: f32,
    /// Divisor applied to the clock before `sin` (0.3 gives a ~1.88s cycle)
    pub hover_period: f32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            hover_amplitude: 10.0,
            hover_period: 0.3,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub flyer: FlyerConfig,
    pub obstacles: ObstacleConfig,
    pub particles: ParticleConfig,
    pub menu: MenuConfig,
    /// Largest dt the loop driver will hand to the simulation
    pub max_frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flyer: FlyerConfig::default(),
            obstacles: ObstacleConfig::default(),
            particles: ParticleConfig::default(),
            menu: MenuConfig::default(),
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("flyer.radius", self.flyer.radius),
            ("flyer.max_rotation", self.flyer.max_rotation),
            ("obstacles.spawn_interval", self.obstacles.spawn_interval),
            ("obstacles.width", self.obstacles.width),
            ("obstacles.gap", self.obstacles.gap),
            ("particles.decay_rate", self.particles.decay_rate),
            ("menu.hover_period", self.menu.hover_period),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.obstacles.min_height < 0.0 {
            return Err(ConfigError::Invalid(
                "obstacles.min_height must not be negative".into(),
            ));
        }
        if self.particles.min_speed > self.particles.max_speed
            || self.particles.min_size > self.particles.max_size
        {
            return Err(ConfigError::Invalid(
                "particle ranges must have min <= max".into(),
            ));
        }
        Ok(())
    }

    /// Shortest play area that can fit a gap plus two minimum-height sections
    pub fn min_play_height(&self) -> f32 {
        self.obstacles.gap + 2.0 * self.obstacles.min_height
    }
}
