use crate::paint::{Scene, paint_graph};
use crate::surface::{DrawSurface, Font, Stroke, estimate_text_width};
use crate::theme::Theme;
use kurbo::{Point, Rect};
use pb_core::layout::CanvasSize;
use std::fmt::Write;

/// Builds a standalone SVG document from draw calls.
#[derive(Debug, Default)]
pub struct SvgSurface {
    size: Option<CanvasSize>,
    body: String,
    glow_colors: Vec<&'static str>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        let size = self.size.unwrap_or_default();
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = size.width,
            h = size.height
        );
        if !self.glow_colors.is_empty() {
            svg.push_str("  <defs>\n");
            for (i, color) in self.glow_colors.iter().enumerate() {
                let _ = writeln!(
                    svg,
                    "    <filter id=\"glow{i}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"3\" flood-color=\"{color}\"/></filter>"
                );
            }
            svg.push_str("  </defs>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn glow_filter(&mut self, color: &'static str) -> usize {
        match self.glow_colors.iter().position(|c| *c == color) {
            Some(i) => i,
            None => {
                self.glow_colors.push(color);
                self.glow_colors.len() - 1
            }
        }
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self, size: CanvasSize) {
        self.size = Some(size);
        self.body.clear();
        self.glow_colors.clear();
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let filter = match stroke.glow {
            Some(glow) => format!(" filter=\"url(#glow{})\"", self.glow_filter(glow.color)),
            None => String::new(),
        };
        let _ = writeln!(
            self.body,
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"{filter}/>",
            from.x, from.y, to.x, to.y, stroke.color, stroke.width
        );
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Option<&'static str>, stroke: Option<&Stroke>) {
        let stroke_attrs = match stroke {
            Some(s) => format!(" stroke=\"{}\" stroke-width=\"{}\"", s.color, s.width),
            None => String::new(),
        };
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"{stroke_attrs}/>",
            center.x,
            center.y,
            radius,
            fill.unwrap_or("none")
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: &'static str) {
        let _ = writeln!(
            self.body,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            color
        );
    }

    fn text(&mut self, origin: Point, text: &str, font: &Font, color: &'static str) {
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            origin.x,
            origin.y,
            font.family,
            font.size,
            color,
            escape(text)
        );
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        estimate_text_width(text, font)
    }
}

/// Render a scene straight to an SVG string.
pub fn render_svg(scene: &Scene<'_>, size: CanvasSize, theme: &Theme) -> String {
    let mut surface = SvgSurface::new();
    paint_graph(&mut surface, scene, size, theme);
    surface.finish()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
