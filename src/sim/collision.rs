//! Collision tests between the flyer and the play area
//!
//! The flyer is drawn as a circle but collides as the square that encloses
//! it (side `2 * radius`), so corners hit slightly early.

use glam::Vec2;

use super::obstacles::ObstaclePair;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Square box of half-size `half_extent` centered on `center`
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        let half = Vec2::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap with the horizontal span `[x0, x1]`
    pub fn overlaps_span(&self, x0: f32, x1: f32) -> bool {
        self.right() > x0 && self.left() < x1
    }
}

/// Box pokes through the ceiling (y < 0) or the floor (y > height)
pub fn outside_play_area(bounds: &Aabb, play_height: f32) -> bool {
    bounds.bottom() > play_height || bounds.top() < 0.0
}

/// Box is inside the obstacle's column but not inside its gap
pub fn hits_obstacle(bounds: &Aabb, pair: &ObstaclePair) -> bool {
    bounds.overlaps_span(pair.x, pair.right())
        && (bounds.top() < pair.top_height || bounds.bottom() > pair.bottom_y)
}

/// Box has moved fully past the obstacle's right edge
pub fn has_cleared(bounds: &Aabb, pair: &ObstaclePair) -> bool {
    bounds.left() > pair.right()
}
