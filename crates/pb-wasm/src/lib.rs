//! WASM bridge for Pathboard: exposes the editor to the page's JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the `<canvas>`,
//! the buttons and all networking; it forwards clicks here, asks for the
//! query/save bodies as JSON, and hands server responses back as JSON.

mod render2d;

use pb_core::id::NodeId;
use pb_core::layout::{MIN_CANVAS_HEIGHT, Viewport};
use pb_core::protocol::{GraphDocument, PathResult, SaveRequest};
use pb_editor::{Editor, InputProvider, Mode, PointerEvent, ScreenRect};
use pb_render::{Theme, render_svg};
use render2d::Canvas2dSurface;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The canvas controller. All interaction from the page goes through it.
#[wasm_bindgen]
pub struct GraphCanvas {
    editor: Editor,
    /// `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl GraphCanvas {
    /// Create an empty editor for a container `container_width` pixels wide.
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            editor: Editor::new(container_viewport(container_width)),
            dark_mode: false,
        }
    }

    /// Redraw everything into `ctx`.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let mut surface = Canvas2dSurface::new(ctx);
        self.editor.render(&mut surface, &self.theme());
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    /// Bitmap width the `<canvas>` element should have.
    pub fn canvas_width(&self) -> u32 {
        self.editor.canvas().width
    }

    /// Bitmap height the `<canvas>` element should have.
    pub fn canvas_height(&self) -> u32 {
        self.editor.canvas().height
    }

    /// The container was resized; refit and report whether the canvas
    /// bitmap must change size.
    pub fn resize_to_container(&mut self, container_width: f64) -> bool {
        let before = self.editor.canvas();
        self.editor
            .resize_to_container(container_viewport(container_width));
        self.editor.canvas() != before
    }

    // ─── Modes ───────────────────────────────────────────────────────────

    /// Switch mode by name (`add-node`, `add-edge`, `select-start`,
    /// `select-end`). Unknown names are ignored.
    pub fn set_mode(&mut self, name: &str) -> bool {
        match Mode::from_name(name) {
            Some(mode) => {
                self.editor.set_mode(mode);
                true
            }
            None => false,
        }
    }

    pub fn mode(&self) -> String {
        self.editor.mode().name().to_string()
    }

    pub fn mode_status(&self) -> String {
        self.editor.mode_status().to_string()
    }

    /// Mirror the page's weight input.
    pub fn set_weight_field(&mut self, text: &str) {
        self.editor.set_weight_field(Some(text.to_string()));
    }

    /// Handle a click. `left/top/width/height` are the canvas's
    /// `getBoundingClientRect()`. Returns `true` if a redraw is needed.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_click(
        &mut self,
        client_x: f64,
        client_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        let rect = ScreenRect {
            left,
            top,
            width,
            height,
        };
        self.click_with(PointerEvent::new(client_x, client_y), rect, &mut PromptInput)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn start_id(&self) -> Option<String> {
        self.editor.start().map(|id| id.as_str().to_string())
    }

    pub fn end_id(&self) -> Option<String> {
        self.editor.end().map(|id| id.as_str().to_string())
    }

    pub fn set_start(&mut self, id: &str) -> bool {
        self.editor.set_start(NodeId::intern(id))
    }

    pub fn set_end(&mut self, id: &str) -> bool {
        self.editor.set_end(NodeId::intern(id))
    }

    pub fn reset(&mut self) {
        self.editor.reset();
    }

    // ─── Path queries ────────────────────────────────────────────────────

    /// Body for the solver request, or `undefined` if start or end is unset.
    pub fn query_request_json(&self) -> Option<String> {
        let query = self.editor.query_request()?;
        serde_json::to_string(&query).ok()
    }

    /// Apply the solver's response body and return the summary line.
    /// Anything unparseable (including an empty string for a failed
    /// request) counts as "no route".
    pub fn apply_query_json(&mut self, json: &str) -> String {
        let result = serde_json::from_str::<PathResult>(json).unwrap_or_else(|e| {
            log::warn!("unreadable solver response: {e}");
            PathResult::empty()
        });
        self.editor.apply_query_result(result).summary()
    }

    /// The latest route report (distance, route names, iteration table) as
    /// JSON, or `null` before any query.
    pub fn report_json(&self) -> String {
        serde_json::to_string(&self.editor.report()).unwrap_or_else(|_| "null".to_string())
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Load a graph from the store's response body. Returns `false` (and
    /// leaves the graph untouched) if it can't be parsed.
    pub fn load_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<GraphDocument>(json) {
            Ok(doc) => {
                let report = self.editor.load(doc);
                log::debug!("loaded {report:?}");
                true
            }
            Err(e) => {
                log::warn!("unreadable graph document: {e}");
                false
            }
        }
    }

    /// The current graph as `{ nodes, edges }`.
    pub fn document_json(&self) -> String {
        serde_json::to_string(&self.editor.document()).unwrap_or_default()
    }

    /// Body for the save request.
    pub fn save_request_json(&self, name: &str) -> String {
        let request = SaveRequest::new(name, self.editor.document());
        serde_json::to_string(&request).unwrap_or_default()
    }

    /// Rows for the nodes table.
    pub fn nodes_json(&self) -> String {
        serde_json::to_string(&self.editor.node_rows()).unwrap_or_default()
    }

    /// Rows for the edges table.
    pub fn edges_json(&self) -> String {
        serde_json::to_string(&self.editor.edge_rows()).unwrap_or_default()
    }

    /// The current drawing as a standalone SVG document.
    pub fn export_svg(&self) -> String {
        render_svg(&self.editor.scene(), self.editor.canvas(), &self.theme())
    }
}

impl GraphCanvas {
    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }

    fn click_with(
        &mut self,
        event: PointerEvent,
        rect: ScreenRect,
        input: &mut dyn InputProvider,
    ) -> bool {
        self.editor.click(&event, &rect, input).needs_redraw()
    }
}

fn container_viewport(width: f64) -> Viewport {
    Viewport {
        width,
        height: MIN_CANVAS_HEIGHT as f64,
    }
}

/// Asks the user through `window.prompt`. A valid weight already in the
/// page's weight field is used without prompting.
struct PromptInput;

impl InputProvider for PromptInput {
    fn node_name(&mut self, default: &str) -> Option<String> {
        prompt("Node name:", default)
    }

    fn edge_weight(&mut self, preset: Option<f64>) -> Option<String> {
        match preset {
            Some(w) => Some(w.to_string()),
            None => prompt("Distance (m):", "1"),
        }
    }
}

fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Pathboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
