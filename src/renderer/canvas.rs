//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, TextStyle, Transform};
use crate::color::Color;
use crate::platform::PlatformError;

/// `Surface` over a canvas element's 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Size in CSS pixels; the backing store is scaled by the device ratio
    size: Vec2,
    pixel_ratio: f64,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, PlatformError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PlatformError::Js(format!("{:?}", e)))?
            .ok_or(PlatformError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::NoContext)?;

        let mut surface = Self {
            canvas,
            ctx,
            size: Vec2::ZERO,
            pixel_ratio: 1.0,
        };
        surface.fit_to_client();
        Ok(surface)
    }

    /// Match the backing store to the element's layout size; returns the CSS size
    pub fn fit_to_client(&mut self) -> Vec2 {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = self.canvas.client_width().max(1);
        let client_h = self.canvas.client_height().max(1);

        self.canvas.set_width((client_w as f64 * dpr) as u32);
        self.canvas.set_height((client_h as f64 * dpr) as u32);
        self.pixel_ratio = dpr;
        self.size = Vec2::new(client_w as f32, client_h as f32);
        log::info!("Canvas {}x{} (dpr {})", client_w, client_h, dpr);
        self.size
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn fill(&self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        // Resetting the transform also drops any unbalanced save()
        let _ = self.ctx.reset_transform();
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        let _ = self.ctx.scale(self.pixel_ratio, self.pixel_ratio);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.fill(color);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.fill(color);
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x.max(0.0) as f64,
            radii.y.max(0.0) as f64,
            0.0,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.fill(color);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font());
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_text_baseline("middle");

        let (x, y) = (pos.x as f64, pos.y as f64);
        if let Some((color, width)) = style.stroke {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            let _ = self.ctx.stroke_text(text, x, y);
        }
        self.fill(style.fill);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn push_transform(&mut self, transform: Transform) {
        self.ctx.save();
        let _ = self
            .ctx
            .translate(transform.translate.x as f64, transform.translate.y as f64);
        let _ = self.ctx.rotate(transform.rotate as f64);
        let _ = self
            .ctx
            .scale(transform.scale.x as f64, transform.scale.y as f64);
    }

    fn pop_transform(&mut self) {
        self.ctx.restore();
    }
}
