//! 2D drawing
//!
//! The game draws through the `Surface` trait: a handful of filled shapes,
//! outlined text and a save/restore transform stack. `CanvasSurface` maps it
//! onto Canvas 2D in the browser; `RecordingSurface` keeps a command log for
//! headless runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::draw_scene;

use glam::Vec2;

use crate::color::Color;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Fill, optional outline, size and weight of a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub fill: Color,
    /// Outline color and line width
    pub stroke: Option<(Color, f32)>,
    /// Font size in surface units
    pub size: f32,
    pub bold: bool,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            fill: Color::WHITE,
            stroke: None,
            size,
            bold: false,
            align: TextAlign::Center,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn outlined(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some((color, width));
        self
    }

    /// CSS font shorthand
    pub fn font(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px \"Segoe UI\", sans-serif", weight, self.size)
    }
}

/// Translate, then rotate, then scale (applied in that order to the frame)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    /// Radians, clockwise on a y-down surface
    pub rotate: f32,
    pub scale: Vec2,
}

impl Transform {
    pub fn new(translate: Vec2, rotate: f32) -> Self {
        Self {
            translate,
            rotate,
            scale: Vec2::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Map a point from this local frame into the parent frame
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.translate + Vec2::from_angle(self.rotate).rotate(local * self.scale)
    }
}

/// Opaque 2D drawing surface
pub trait Surface {
    /// Surface size in drawing units
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
    /// Save state and enter a local frame
    fn push_transform(&mut self, transform: Transform);
    /// Restore the state saved by the matching `push_transform`
    fn pop_transform(&mut self);
}

/// Draw inside a local frame; the previous frame is always restored
pub fn with_transform<S, F>(surface: &mut S, transform: Transform, draw: F)
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S),
{
    surface.push_transform(transform);
    draw(surface);
    surface.pop_transform();
}
