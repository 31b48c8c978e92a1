//! HTML canvas surface (wasm32 only)

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};

/// Draws through a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    /// Wrap the canvas' 2D context. Returns `None` if the browser refuses
    /// to hand one out.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color<'_>) {
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("Canvas arc failed: {:?}", e);
        }
        self.ctx.set_fill_style_str(color.css());
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color<'_>) {
        self.ctx.begin_path();
        self.ctx
            .rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        self.ctx.set_fill_style_str(color.css());
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Color<'_>) {
        self.ctx.set_fill_style_str(color.css());
        self.ctx.set_font(font);
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("Canvas fill_text failed: {:?}", e);
        }
    }
}
