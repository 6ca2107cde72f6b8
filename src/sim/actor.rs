//! The player-controlled flyer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::FlyerConfig;

/// Falling body that flaps upward on input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flyer {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Display tilt in radians, derived from vertical velocity
    pub rotation: f32,
    config: FlyerConfig,
}

impl Flyer {
    pub fn new(config: FlyerConfig, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: config.radius,
            rotation: 0.0,
            config,
        }
    }

    /// Instant upward kick, independent of current velocity
    pub fn apply_impulse(&mut self) {
        self.vel.y = self.config.flap_velocity;
        self.rotation = self.config.flap_tilt;
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += self.config.gravity * dt;
        self.pos.y += self.vel.y * dt;

        let max = self.config.max_rotation;
        self.rotation = (self.vel.y * self.config.rotation_gain).clamp(-max, max);
    }

    /// Title screen bob around `center_y`
    pub fn hover(&mut self, center_y: f32, clock: f32, amplitude: f32, period: f32) {
        self.pos.y = center_y + (clock / period).sin() * amplitude;
        self.rotation = 0.0;
    }

    pub fn reset_to(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
    }

    /// Square collision box enclosing the body
    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flyer() -> Flyer {
        Flyer::new(FlyerConfig::default(), Vec2::new(100.0, 300.0))
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        for prior in [-900.0, 0.0, 1234.0] {
            let mut f = flyer();
            f.vel.y = prior;
            f.apply_impulse();
            assert_eq!(f.vel.y, -500.0);
            assert_eq!(f.rotation, -std::f32::consts::FRAC_PI_4);
        }
    }

    #[test]
    fn test_integration_matches_closed_form() {
        let mut f = flyer();
        f.vel.y = -120.0;
        let dt = 0.016;
        let n = 50;
        for _ in 0..n {
            f.integrate(dt);
        }
        let expected = -120.0 + 2000.0 * dt * n as f32;
        assert!((f.vel.y - expected).abs() < 1e-2);
        // Horizontal motion is never touched
        assert_eq!(f.pos.x, 100.0);
    }

    #[test]
    fn test_hover_and_reset() {
        let mut f = flyer();
        f.rotation = 0.5;
        f.hover(300.0, 0.3 * std::f32::consts::FRAC_PI_2, 10.0, 0.3);
        assert!((f.pos.y - 310.0).abs() < 1e-3);
        assert_eq!(f.rotation, 0.0);

        f.vel = Vec2::new(3.0, 4.0);
        f.reset_to(100.0, 250.0);
        assert_eq!(f.pos, Vec2::new(100.0, 250.0));
        assert_eq!(f.vel, Vec2::ZERO);
        assert_eq!(f.rotation, 0.0);
    }

    #[test]
    fn test_bounds_is_square() {
        let b = flyer().bounds();
        assert_eq!(b.right() - b.left(), 40.0);
        assert_eq!(b.bottom() - b.top(), 40.0);
    }

    proptest! {
        #[test]
        fn prop_rotation_stays_clamped(vy in -10_000.0f32..10_000.0, dt in 0.0f32..0.1) {
            let mut f = flyer();
            f.vel.y = vy;
            f.integrate(dt);
            prop_assert!(f.rotation.abs() <= std::f32::consts::FRAC_PI_4);
        }
    }

    #[test]
    fn test_rotation_saturates_at_extremes() {
        let mut f = flyer();
        f.vel.y = 10_000.0;
        f.integrate(0.0);
        assert_eq!(f.rotation, std::f32::consts::FRAC_PI_4);

        f.vel.y = -10_000.0;
        f.integrate(0.0);
        assert_eq!(f.rotation, -std::f32::consts::FRAC_PI_4);
    }
}
