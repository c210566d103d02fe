//! Mode system for canvas clicks.
//!
//! `ToolState` turns a click (plus the hit-test result) into a `ToolAction`
//! for the active mode. The editor applies the action to the model, asking
//! the `InputProvider` for any text the action needs.
//!
//! | Mode | Click on node | Click on empty space |
//! |------|---------------|----------------------|
//! | **AddNode** | add node | add node |
//! | **AddEdge** | pick source / toggle off / connect | drop source |
//! | **SelectStart** | set start | no-op |
//! | **SelectEnd** | set end | no-op |

use kurbo::Point;
use pb_core::id::NodeId;

/// The active mode determines how clicks are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    AddNode,
    AddEdge,
    SelectStart,
    SelectEnd,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::AddNode, Mode::AddEdge, Mode::SelectStart, Mode::SelectEnd];

    /// Stable name used by hosts (`"add-node"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Mode::AddNode => "add-node",
            Mode::AddEdge => "add-edge",
            Mode::SelectStart => "select-start",
            Mode::SelectEnd => "select-end",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Status-line text; AddEdge changes once a source is picked.
    pub fn status(self, source_pending: bool) -> &'static str {
        match self {
            Mode::AddNode => "Mode: Add Node",
            Mode::AddEdge if source_pending => "Mode: Add Edge (pick second node)",
            Mode::AddEdge => "Mode: Add Edge",
            Mode::SelectStart => "Mode: Select Start",
            Mode::SelectEnd => "Mode: Select End",
        }
    }
}

/// Source of user-entered text (names, weights).
pub trait InputProvider {
    /// Name for a node about to be created. `None` or a blank answer keeps
    /// `default`.
    fn node_name(&mut self, default: &str) -> Option<String>;

    /// Weight for an edge about to be created. `preset` is the weight field's
    /// value when it holds a positive number. `None` cancels.
    fn edge_weight(&mut self, preset: Option<f64>) -> Option<String>;
}

/// Parse user weight text; only finite positive numbers are accepted.
pub fn parse_weight(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
}

/// What a click asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    /// Nothing to do, nothing to redraw.
    None,
    AddNode { at: Point },
    PickSource(NodeId),
    /// Drop the pending edge source.
    ClearSource,
    /// Create an edge between the pending source and `to` (needs a weight).
    Connect { from: NodeId, to: NodeId },
    SetStart(NodeId),
    SetEnd(NodeId),
}

/// Active mode plus the pending edge source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolState {
    mode: Mode,
    pending_source: Option<NodeId>,
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_source(&self) -> Option<NodeId> {
        self.pending_source
    }

    /// Switch modes. Always discards the pending edge source.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.pending_source = None;
    }

    /// Forget the pending source without changing mode.
    pub fn clear_source(&mut self) {
        self.pending_source = None;
    }

    pub fn status(&self) -> &'static str {
        self.mode.status(self.pending_source.is_some())
    }

    /// Interpret a click at `at` whose hit test returned `hit`.
    pub fn handle_click(&mut self, at: Point, hit: Option<NodeId>) -> ToolAction {
        match self.mode {
            Mode::AddNode => ToolAction::AddNode { at },
            Mode::AddEdge => match (hit, self.pending_source) {
                (None, Some(_)) => {
                    self.pending_source = None;
                    ToolAction::ClearSource
                }
                (None, None) => ToolAction::None,
                (Some(id), None) => {
                    self.pending_source = Some(id);
                    ToolAction::PickSource(id)
                }
                (Some(id), Some(src)) if id == src => {
                    self.pending_source = None;
                    ToolAction::ClearSource
                }
                (Some(id), Some(src)) => {
                    self.pending_source = None;
                    ToolAction::Connect { from: src, to: id }
                }
            },
            Mode::SelectStart => hit.map_or(ToolAction::None, ToolAction::SetStart),
            Mode::SelectEnd => hit.map_or(ToolAction::None, ToolAction::SetEnd),
        }
    }
}
