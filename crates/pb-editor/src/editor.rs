//! The editor context: one owned value holding the graph, the interaction
//! state, endpoint selections and the latest solver result.
//!
//! Hosts (the WASM canvas, the CLI) drive it with clicks and network results
//! and redraw through any `DrawSurface`. Nothing here does I/O; the host asks
//! for a `PathQuery`, sends it however it likes, and feeds the `PathResult`
//! back in.

use crate::input::{PointerEvent, ScreenRect, map_to_canvas};
use crate::report::{self, EdgeRow, NodeRow, RouteReport};
use crate::tools::{InputProvider, Mode, ToolAction, ToolState, parse_weight};
use kurbo::Point;
use pb_core::id::NodeId;
use pb_core::layout::{self, CanvasSize, Viewport};
use pb_core::model::{GraphModel, LoadReport, PathHighlight};
use pb_core::protocol::{EdgeRecord, GraphDocument, PathQuery, PathResult};
use pb_render::{DrawSurface, Scene, Theme, hit_test, paint_graph};

/// What a click did. Anything other than `Ignored` needs a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    NodeAdded(NodeId),
    SourcePicked(NodeId),
    SourceCleared,
    EdgeAdded { a: NodeId, b: NodeId },
    /// A second node was picked but no usable weight was given.
    EdgeAborted,
    StartSelected(NodeId),
    EndSelected(NodeId),
}

impl ClickOutcome {
    pub fn needs_redraw(self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }
}

/// Graph editor state.
#[derive(Debug, Clone)]
pub struct Editor {
    model: GraphModel,
    tools: ToolState,
    start: Option<NodeId>,
    end: Option<NodeId>,
    highlight: PathHighlight,
    report: Option<RouteReport>,
    viewport: Viewport,
    canvas: CanvasSize,
    /// Raw contents of the host's weight field, if it has one.
    weight_field: Option<String>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl Editor {
    /// Create an empty editor for a container of the given size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            model: GraphModel::new(),
            tools: ToolState::new(),
            start: None,
            end: None,
            highlight: PathHighlight::new(),
            report: None,
            viewport,
            canvas: CanvasSize::fit_container(viewport),
            weight_field: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn mode(&self) -> Mode {
        self.tools.mode()
    }

    pub fn pending_source(&self) -> Option<NodeId> {
        self.tools.pending_source()
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    pub fn highlight(&self) -> &PathHighlight {
        &self.highlight
    }

    /// Report for the most recent query, if one has completed.
    pub fn report(&self) -> Option<&RouteReport> {
        self.report.as_ref()
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // ─── Modes & selection ───────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode -> {}", mode.name());
        self.tools.set_mode(mode);
    }

    pub fn mode_status(&self) -> &'static str {
        self.tools.status()
    }

    /// Mirror the host's weight input; used to pre-fill the weight prompt.
    pub fn set_weight_field(&mut self, text: Option<String>) {
        self.weight_field = text;
    }

    /// Select the start node directly. Unknown ids are ignored.
    pub fn set_start(&mut self, id: NodeId) -> bool {
        if !self.model.contains(id) {
            return false;
        }
        self.start = Some(id);
        true
    }

    /// Select the end node directly. Unknown ids are ignored.
    pub fn set_end(&mut self, id: NodeId) -> bool {
        if !self.model.contains(id) {
            return false;
        }
        self.end = Some(id);
        true
    }

    // ─── Clicks ──────────────────────────────────────────────────────────

    /// Handle a click from the host in screen coordinates.
    pub fn click(
        &mut self,
        event: &PointerEvent,
        rect: &ScreenRect,
        input: &mut dyn InputProvider,
    ) -> ClickOutcome {
        let point = map_to_canvas(event, rect, self.canvas);
        self.click_at(point, input)
    }

    /// Handle a click already in canvas coordinates.
    pub fn click_at(&mut self, point: Point, input: &mut dyn InputProvider) -> ClickOutcome {
        let hit = hit_test(&self.model, point);
        match self.tools.handle_click(point, hit) {
            ToolAction::None => ClickOutcome::Ignored,
            ToolAction::AddNode { at } => {
                let default = self.model.default_name();
                let name = input.node_name(&default);
                let id = self.model.add_node(at.x, at.y, name.as_deref()).id;
                ClickOutcome::NodeAdded(id)
            }
            ToolAction::PickSource(id) => ClickOutcome::SourcePicked(id),
            ToolAction::ClearSource => ClickOutcome::SourceCleared,
            ToolAction::Connect { from, to } => self.connect(from, to, input),
            ToolAction::SetStart(id) => {
                self.start = Some(id);
                ClickOutcome::StartSelected(id)
            }
            ToolAction::SetEnd(id) => {
                self.end = Some(id);
                ClickOutcome::EndSelected(id)
            }
        }
    }

    fn connect(&mut self, from: NodeId, to: NodeId, input: &mut dyn InputProvider) -> ClickOutcome {
        let preset = self.weight_field.as_deref().and_then(parse_weight);
        let Some(w) = input.edge_weight(preset).as_deref().and_then(parse_weight) else {
            log::debug!("edge {from} - {to} aborted: no usable weight");
            return ClickOutcome::EdgeAborted;
        };
        match self.model.add_edge(from, to, w) {
            Some(_) => ClickOutcome::EdgeAdded { a: from, b: to },
            None => ClickOutcome::EdgeAborted,
        }
    }

    // ─── Whole-graph operations ──────────────────────────────────────────

    /// Clear everything: graph, selections, highlight and report.
    pub fn reset(&mut self) {
        self.model.reset();
        self.tools.clear_source();
        self.start = None;
        self.end = None;
        self.highlight.clear();
        self.report = None;
        self.canvas = CanvasSize::fit_container(self.viewport);
    }

    /// Replace the graph with a loaded document, fit it to the canvas and
    /// pick the lowest/highest numbered nodes as start/end.
    pub fn load(&mut self, doc: GraphDocument) -> LoadReport {
        let loaded = self.model.load_from(doc, self.viewport);
        self.tools.clear_source();
        self.highlight.clear();
        self.report = None;
        self.auto_fit();

        let key = |id: &NodeId| id.numeric_run().unwrap_or(0);
        let ids: Vec<NodeId> = self.model.nodes().map(|n| n.id).collect();
        self.start = ids.iter().copied().min_by_key(key);
        self.end = ids.iter().copied().max_by_key(key);
        loaded
    }

    /// Re-run the auto-fit transform from the load snapshot.
    pub fn auto_fit(&mut self) -> CanvasSize {
        self.canvas = layout::auto_fit(&mut self.model, self.viewport);
        self.canvas
    }

    /// The container changed size; refit.
    pub fn resize_to_container(&mut self, viewport: Viewport) -> CanvasSize {
        self.viewport = viewport;
        self.auto_fit()
    }

    /// The current graph as a save/export document.
    pub fn document(&self) -> GraphDocument {
        self.model.to_document()
    }

    // ─── Path queries ────────────────────────────────────────────────────

    /// Solver request for the current endpoints, or `None` if either is unset.
    pub fn query_request(&self) -> Option<PathQuery> {
        let (start, end) = (self.start?, self.end?);
        if !self.model.contains(start) || !self.model.contains(end) {
            return None;
        }
        Some(PathQuery {
            nodes: self.model.nodes().map(|n| n.id).collect(),
            edges: self.model.edges().map(EdgeRecord::from).collect(),
            start_id: start,
            end_id: end,
        })
    }

    /// Replace highlight and report with a solver result. The last result
    /// applied wins.
    pub fn apply_query_result(&mut self, result: PathResult) -> &RouteReport {
        if result.has_route() {
            self.highlight.replace(result.edge_path.iter().copied());
        } else {
            self.highlight.clear();
        }
        log::debug!(
            "query result: total {:?}, {} path edges",
            result.total,
            self.highlight.edges().len()
        );
        self.report
            .insert(RouteReport::from_result(&result, &self.model))
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            model: &self.model,
            highlight: &self.highlight,
            start: self.start,
            end: self.end,
            pending_source: self.tools.pending_source(),
        }
    }

    /// Redraw the whole canvas.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, theme: &Theme) {
        paint_graph(surface, &self.scene(), self.canvas, theme);
    }

    pub fn node_rows(&self) -> Vec<NodeRow> {
        report::node_rows(&self.model)
    }

    pub fn edge_rows(&self) -> Vec<EdgeRow> {
        report::edge_rows(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_core::protocol::NodeRecord;

    /// Answers every prompt from fixed values.
    struct Canned {
        name: Option<String>,
        weight: Option<String>,
        weight_presets: Vec<Option<f64>>,
    }

    impl Canned {
        fn new(name: Option<&str>, weight: Option<&str>) -> Self {
            Self {
                name: name.map(str::to_string),
                weight: weight.map(str::to_string),
                weight_presets: Vec::new(),
            }
        }
    }

    impl InputProvider for Canned {
        fn node_name(&mut self, _default: &str) -> Option<String> {
            self.name.clone()
        }

        fn edge_weight(&mut self, preset: Option<f64>) -> Option<String> {
            self.weight_presets.push(preset);
            self.weight.clone()
        }
    }

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    #[test]
    fn add_node_click_uses_default_name_when_cancelled() {
        let mut editor = Editor::default();
        let outcome = editor.click_at(Point::new(61.0, 59.0), &mut Canned::new(None, None));
        assert_eq!(outcome, ClickOutcome::NodeAdded(id("1")));
        let node = editor.model().get(id("1")).unwrap();
        assert_eq!(node.name, "N1");
        assert_eq!(node.position(), Point::new(60.0, 60.0));
    }

    #[test]
    fn weight_field_prefills_prompt() {
        let mut editor = Editor::default();
        let mut input = Canned::new(None, Some("7"));
        editor.click_at(Point::new(0.0, 0.0), &mut input);
        editor.click_at(Point::new(120.0, 0.0), &mut input);
        editor.set_mode(Mode::AddEdge);
        editor.set_weight_field(Some("12".into()));
        editor.click_at(Point::new(0.0, 0.0), &mut input);
        let outcome = editor.click_at(Point::new(120.0, 0.0), &mut input);
        assert_eq!(outcome, ClickOutcome::EdgeAdded { a: id("1"), b: id("2") });
        assert_eq!(input.weight_presets, vec![Some(12.0)]);
        assert_eq!(editor.model().edges().next().map(|e| e.w), Some(7.0));
    }

    #[test]
    fn invalid_weight_aborts_and_clears_source() {
        let mut editor = Editor::default();
        let mut input = Canned::new(None, Some("-2"));
        editor.click_at(Point::new(0.0, 0.0), &mut input);
        editor.click_at(Point::new(120.0, 0.0), &mut input);
        editor.set_mode(Mode::AddEdge);
        editor.set_weight_field(Some("zero".into()));
        editor.click_at(Point::new(0.0, 0.0), &mut input);
        let outcome = editor.click_at(Point::new(120.0, 0.0), &mut input);
        assert_eq!(outcome, ClickOutcome::EdgeAborted);
        assert_eq!(input.weight_presets, vec![None]);
        assert_eq!(editor.model().edge_count(), 0);
        assert_eq!(editor.pending_source(), None);
    }

    #[test]
    fn no_query_without_both_endpoints() {
        let mut editor = Editor::default();
        let mut input = Canned::new(None, None);
        editor.click_at(Point::new(0.0, 0.0), &mut input);
        assert!(editor.set_start(id("1")));
        assert_eq!(editor.query_request(), None);
        assert!(!editor.set_end(id("99")));
        assert_eq!(editor.query_request(), None);
    }

    #[test]
    fn load_selects_extreme_numbered_endpoints() {
        let mut editor = Editor::default();
        let record = |id: &str, x: f64| NodeRecord {
            id: NodeId::intern(id),
            name: None,
            x: Some(x),
            y: Some(0.0),
        };
        editor.load(GraphDocument {
            nodes: vec![record("7", 0.0), record("2", 60.0), record("11", 120.0)],
            edges: vec![],
        });
        assert_eq!(editor.start(), Some(id("2")));
        assert_eq!(editor.end(), Some(id("11")));
        assert_eq!(editor.model().get(id("7")).map(|n| n.x), Some(40.0));
    }

    #[test]
    fn reset_clears_selection_and_report() {
        let mut editor = Editor::default();
        let mut input = Canned::new(None, None);
        editor.click_at(Point::ZERO, &mut input);
        editor.set_start(id("1"));
        editor.apply_query_result(PathResult::empty());
        editor.reset();
        assert!(editor.model().is_empty());
        assert_eq!(editor.start(), None);
        assert!(editor.report().is_none());
        assert_eq!(editor.model().default_name(), "N1");
    }
}
