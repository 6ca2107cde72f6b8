//! Short-lived decorative particle bursts
//!
//! Particles never affect gameplay; they fade out over half a second
//! (at the default decay rate) and are dropped when their life runs out.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::color::Color;
use crate::config::ParticleConfig;

/// A single spark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 when emitted, removed at 0
    pub life: f32,
    pub color: Color,
    pub size: f32,
}

/// Owns every live particle, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePool {
    config: ParticleConfig,
    particles: VecDeque<Particle>,
}

impl ParticlePool {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            config,
            particles: VecDeque::with_capacity(config.max_particles),
        }
    }

    /// Spray `count` particles in random directions from `at`
    pub fn emit<R: RandomSource + ?Sized>(
        &mut self,
        at: Vec2,
        count: usize,
        color: Color,
        rng: &mut R,
    ) {
        let cfg = self.config;
        if cfg.max_particles == 0 {
            return;
        }

        for _ in 0..count {
            if self.particles.len() >= cfg.max_particles {
                // Make room by dropping the oldest
                self.particles.pop_front();
            }
            let angle = rng.next_float() * std::f32::consts::TAU;
            let speed = rng.range(cfg.min_speed, cfg.max_speed);
            let size = rng.range(cfg.min_size, cfg.max_size);
            self.particles.push_back(Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                color,
                size,
            });
        }
    }

    /// Fade, cull, then move the survivors
    pub fn update(&mut self, dt: f32) {
        let decay = self.config.decay_rate * dt;
        let gravity = self.config.gravity * dt;

        self.particles.retain_mut(|p| {
            p.life -= decay;
            if p.life <= 0.0 {
                return false;
            }
            p.pos += p.vel * dt;
            p.vel.y += gravity;
            true
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
