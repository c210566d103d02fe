//! Colour themes for the graph renderer.

/// Theme-dependent colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Canvas background; `None` leaves the surface transparent.
    pub background: Option<&'static str>,
    pub edge: &'static str,
    pub edge_path: &'static str,
    pub edge_glow: &'static str,
    pub label_plate: &'static str,
    pub label_text: &'static str,
    pub label_text_path: &'static str,
    pub node_fill: &'static str,
    pub node_border: &'static str,
    pub node_label: &'static str,
    pub ring_source: &'static str,
    pub ring_start: &'static str,
    pub ring_end: &'static str,
}

impl Theme {
    /// Light theme: transparent canvas over the page.
    pub fn light() -> Self {
        Self {
            background: None,
            edge: "#94a3b8",
            edge_path: "#2575fc",
            edge_glow: "#a5b4fc",
            label_plate: "rgba(255, 255, 255, 0.95)",
            label_text: "#334155",
            label_text_path: "#1e3a8a",
            node_fill: "#6a00f4",
            node_border: "#ffffff",
            node_label: "#0f172a",
            ring_source: "#6366f1",
            ring_start: "#22c55e",
            ring_end: "#ef4444",
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Some("#1C1C1E"),
            edge: "#636366",
            edge_path: "#5E9BFF",
            edge_glow: "#3b4a8a",
            label_plate: "rgba(28, 28, 30, 0.92)",
            label_text: "#C7C7CC",
            label_text_path: "#A5C8FF",
            node_fill: "#9B5CFF",
            node_border: "#1C1C1E",
            node_label: "#F2F2F7",
            ring_source: "#818cf8",
            ring_start: "#4ade80",
            ring_end: "#f87171",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
