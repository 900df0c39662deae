//! Canvas 2D painter for the particle background

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::ParticleField;

pub struct BackgroundPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl BackgroundPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn paint(&self, field: &ParticleField) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, field.width as f64, field.height as f64);

        ctx.set_line_width(1.0);
        for link in field.links() {
            ctx.set_stroke_style_str(&format!("rgba(255,255,255,{})", link.alpha));
            ctx.begin_path();
            ctx.move_to(link.from.x as f64, link.from.y as f64);
            ctx.line_to(link.to.x as f64, link.to.y as f64);
            ctx.stroke();
        }

        for p in &field.particles {
            ctx.begin_path();
            ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                p.size as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
            ctx.set_fill_style_str(p.color_hex());
            ctx.fill();
        }
    }
}
