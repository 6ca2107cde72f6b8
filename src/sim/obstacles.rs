//! Scrolling obstacle pairs
//!
//! Pairs spawn on a timer just past the right edge of the play area, scroll
//! left at a shared speed, and are retired once well past the left edge.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::Viewport;
use crate::config::ObstacleConfig;

/// A top and bottom barrier sharing one gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Left edge
    pub x: f32,
    /// Height of the top section (its bottom edge)
    pub top_height: f32,
    /// Y where the bottom section starts (`top_height + gap`)
    pub bottom_y: f32,
    pub width: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl ObstaclePair {
    pub fn new(x: f32, top_height: f32, gap: f32, width: f32) -> Self {
        Self {
            x,
            top_height,
            bottom_y: top_height + gap,
            width,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.bottom_y - self.top_height
    }

    /// Center of the gap, where score bursts are emitted
    pub fn gap_center(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.x + self.width / 2.0,
            self.top_height + self.gap() / 2.0,
        )
    }
}

/// Owns every live obstacle pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleManager {
    config: ObstacleConfig,
    pairs: Vec<ObstaclePair>,
    /// Current scroll speed (units/s)
    speed: f32,
    /// Seconds since the last spawn
    spawn_timer: f32,
}

impl ObstacleManager {
    pub fn new(config: ObstacleConfig) -> Self {
        Self {
            config,
            pairs: Vec::new(),
            speed: config.base_speed,
            spawn_timer: 0.0,
        }
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Advance spawning and scrolling by `dt` seconds
    pub fn update<R: RandomSource + ?Sized>(&mut self, dt: f32, viewport: Viewport, rng: &mut R) {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.config.spawn_interval {
            self.spawn(viewport, rng);
            self.spawn_timer = 0.0;
        }

        let shift = self.speed * dt;
        for pair in &mut self.pairs {
            pair.x -= shift;
        }

        let limit = -self.config.despawn_margin;
        self.pairs.retain(|pair| pair.right() >= limit);
    }

    /// Push a new pair just outside the right edge
    ///
    /// The top section is drawn from `[min_height, height - gap - min_height]`.
    /// When the play area is too short for that range it collapses to
    /// `min_height`, keeping the ceiling section intact and letting the
    /// floor section shrink.
    pub fn spawn<R: RandomSource + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let min = self.config.min_height;
        let max_top = viewport.height - self.config.gap - min;
        let span = (max_top - min).max(0.0);
        let top_height = min + rng.next_float() * span;

        self.pairs.push(ObstaclePair::new(
            viewport.width + self.config.spawn_offset,
            top_height,
            self.config.gap,
            self.config.width,
        ));
    }

    /// Place a pair directly (scripted layouts, tests)
    pub fn insert(&mut self, pair: ObstaclePair) {
        self.pairs.push(pair);
    }

    /// Scroll faster (called once per cleared obstacle)
    pub fn accelerate(&mut self) {
        self.speed += self.config.speed_increment;
    }

    /// Drop every pair and restore the starting timer and speed
    pub fn reset(&mut self) {
        self.pairs.clear();
        self.spawn_timer = 0.0;
        self.speed = self.config.base_speed;
    }
}
