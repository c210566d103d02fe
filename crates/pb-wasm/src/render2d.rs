//! Canvas2D drawing surface.
//!
//! Implements `DrawSurface` on top of an HTML `<canvas>` 2D context so the
//! shared painter can draw straight into the page.

use kurbo::{Point, Rect};
use pb_core::layout::CanvasSize;
use pb_render::surface::estimate_text_width;
use pb_render::{DrawSurface, Font, Stroke};
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> Canvas2dSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
    }
}

impl DrawSurface for Canvas2dSurface<'_> {
    fn clear(&mut self, size: CanvasSize) {
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let ctx = self.ctx;
        ctx.save();
        if let Some(glow) = stroke.glow {
            ctx.set_shadow_color(glow.color);
            ctx.set_shadow_blur(glow.blur);
        }
        self.apply_stroke(stroke);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
        ctx.restore();
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: Option<&'static str>,
        stroke: Option<&Stroke>,
    ) {
        let ctx = self.ctx;
        ctx.begin_path();
        if ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        if let Some(color) = fill {
            ctx.set_fill_style_str(color);
            ctx.fill();
        }
        if let Some(stroke) = stroke {
            self.apply_stroke(stroke);
            ctx.stroke();
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: &'static str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn text(&mut self, origin: Point, text: &str, font: &Font, color: &'static str) {
        self.ctx.set_font(&font.css());
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, origin.x, origin.y);
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        self.ctx.set_font(&font.css());
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or_else(|_| estimate_text_width(text, font))
    }
}
