//! Drawing-surface capability.
//!
//! The painter only talks to a `DrawSurface`, so the same scene can go to a
//! browser canvas, an SVG document, or a recording used in tests.

use kurbo::{Point, Rect};
use pb_core::layout::CanvasSize;

/// A font as the surfaces understand it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub family: &'static str,
}

impl Font {
    pub const fn new(size: f64, family: &'static str) -> Self {
        Self { size, family }
    }

    /// CSS shorthand, e.g. `11px Poppins, sans-serif`.
    pub fn css(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

/// Soft halo drawn behind a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: &'static str,
    pub blur: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub glow: Option<Glow>,
}

impl Stroke {
    pub const fn solid(color: &'static str, width: f64) -> Self {
        Self {
            color,
            width,
            glow: None,
        }
    }
}

/// Primitive drawing operations the renderer needs.
pub trait DrawSurface {
    /// Wipe the surface and set its size.
    fn clear(&mut self, size: CanvasSize);

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);

    fn circle(&mut self, center: Point, radius: f64, fill: Option<&'static str>, stroke: Option<&Stroke>);

    fn fill_rect(&mut self, rect: Rect, color: &'static str);

    /// Draw `text` with its baseline starting at `origin`.
    fn text(&mut self, origin: Point, text: &str, font: &Font, color: &'static str);

    /// Advance width of `text` in `font`.
    fn measure_text(&mut self, text: &str, font: &Font) -> f64;
}

/// Width estimate for surfaces without a text shaper (average glyph is a
/// bit over half the font size for proportional sans fonts).
pub fn estimate_text_width(text: &str, font: &Font) -> f64 {
    text.chars().count() as f64 * font.size * 0.6
}

// ─── Recording surface ───────────────────────────────────────────────────

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(CanvasSize),
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<&'static str>,
        stroke: Option<Stroke>,
    },
    FillRect {
        rect: Rect,
        color: &'static str,
    },
    Text {
        origin: Point,
        text: String,
        font: Font,
        color: &'static str,
    },
}

/// Display list of everything drawn since the last `clear`.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Circles drawn without fill (selection rings).
    pub fn rings(&self) -> impl Iterator<Item = (&Point, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                fill: None,
                stroke: Some(stroke),
                ..
            } => Some((center, stroke)),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, size: CanvasSize) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(size));
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Option<&'static str>, stroke: Option<&Stroke>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke: stroke.copied(),
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: &'static str) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn text(&mut self, origin: Point, text: &str, font: &Font, color: &'static str) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            font: *font,
            color,
        });
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        estimate_text_width(text, font)
    }
}
