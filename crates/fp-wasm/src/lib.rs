//! WASM bridge for the floor-plan canvas: exposes validation and rendering
//! to the web app.
//!
//! Compiled via `wasm-pack build --target web`.

mod render2d;

use fp_core::{FloorPlanDocument, NormalizeWarning, PlanSummary, ValidationError};
use fp_render::{CanvasContent, Frame, MAX_CANVAS_PX, RenderTheme, ViewParams};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The canvas controller the web app talks to.
///
/// Holds the last loaded document (or why it failed) and the view state.
/// Every `render` repaints from scratch.
#[wasm_bindgen]
pub struct FloorPlanCanvas {
    document: Option<FloorPlanDocument>,
    error: Option<ValidationError>,
    warnings: Vec<NormalizeWarning>,
    view: ViewParams,
    theme: RenderTheme,
}

#[wasm_bindgen]
impl FloorPlanCanvas {
    /// Create a canvas controller with the given pixel size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        Self {
            document: None,
            error: None,
            warnings: Vec::new(),
            view: ViewParams::new(to_px(width), to_px(height)),
            theme: RenderTheme::light(),
        }
    }

    /// Load a floor-plan document from JSON text.
    /// Returns `true` if it can be displayed, `false` if it was rejected.
    pub fn load_json(&mut self, text: &str) -> bool {
        let result = serde_json::from_str::<serde_json::Value>(text)
            .map_err(ValidationError::from)
            .and_then(|raw| fp_core::normalize_with_warnings(&raw));
        self.apply(result)
    }

    /// Load the generator's raw reply, tolerating a Markdown code fence.
    pub fn load_generator_output(&mut self, text: &str) -> bool {
        self.apply(fp_core::parse_generator_output(text))
    }

    /// Back to the "no floor plan yet" placeholder.
    pub fn clear(&mut self) {
        self.document = None;
        self.error = None;
        self.warnings.clear();
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.view.grid_visible = visible;
    }

    /// Flip grid visibility and return the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.view.grid_visible = !self.view.grid_visible;
        self.view.grid_visible
    }

    /// Step the zoom up by 25% and return the new percentage.
    pub fn zoom_in(&mut self) -> i32 {
        self.view.zoom_in();
        self.view.zoom_percent
    }

    /// Step the zoom down by 25% and return the new percentage.
    pub fn zoom_out(&mut self) -> i32 {
        self.view.zoom_out();
        self.view.zoom_percent
    }

    /// Set the zoom percentage, clamped to [25, 400]. Returns the applied value.
    pub fn set_zoom(&mut self, percent: i32) -> i32 {
        self.view.set_zoom(percent);
        self.view.zoom_percent
    }

    /// Current zoom percentage.
    pub fn zoom(&self) -> i32 {
        self.view.zoom_percent
    }

    pub fn zoom_scale(&self) -> f64 {
        self.view.zoom_scale()
    }

    /// Resize the canvas.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.view.canvas_width_px = to_px(width);
        self.view.canvas_height_px = to_px(height);
    }

    /// Switch between the built-in light and dark themes.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.theme = if is_dark {
            RenderTheme::dark()
        } else {
            RenderTheme::light()
        };
    }

    /// Override theme fields from JSON. Returns `false` and keeps the current
    /// theme if the JSON is invalid.
    pub fn set_theme_json(&mut self, json: &str) -> bool {
        match RenderTheme::from_json(json) {
            Ok(theme) => {
                self.theme = theme;
                true
            }
            Err(e) => {
                log::warn!("rejected theme override: {e}");
                false
            }
        }
    }

    /// Render the current state to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let frame = self.frame();
        render2d::replay(ctx, &frame, self.view.zoom_scale());
    }

    /// Badge data as JSON, or `null` when no plan is displayed.
    pub fn summary_json(&self) -> String {
        let Some(doc) = &self.document else {
            return "null".to_string();
        };
        let summary = PlanSummary::of(doc);
        let mut value = serde_json::to_value(&summary).unwrap_or(serde_json::Value::Null);
        if let Some(obj) = value.as_object_mut() {
            obj.insert("badges".into(), serde_json::json!(summary.badges()));
        }
        value.to_string()
    }

    /// Why the last load was rejected; empty if it was not.
    pub fn last_error(&self) -> String {
        self.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
    }

    /// Warnings from the last successful load, as a JSON array.
    pub fn warnings_json(&self) -> String {
        serde_json::to_string(&self.warnings).unwrap_or_else(|_| "[]".to_string())
    }

    /// Export the current state as an SVG document.
    pub fn export_svg(&self) -> String {
        fp_render::render_svg(&self.frame())
    }

    /// ID of the room or hallway under a canvas position, or empty.
    /// Coordinates are screen pixels; the zoom is undone here.
    pub fn room_at(&self, x: f64, y: f64) -> String {
        let Some(doc) = &self.document else {
            return String::new();
        };
        let scale = self.view.zoom_scale();
        fp_render::hit_test(doc, x / scale, y / scale)
            .map(|hit| hit.id.as_str().to_string())
            .unwrap_or_default()
    }
}

impl FloorPlanCanvas {
    fn apply(&mut self, result: Result<fp_core::Normalized, ValidationError>) -> bool {
        match result {
            Ok(normalized) => {
                log::info!(
                    "loaded floor plan with {} rooms ({} warnings)",
                    normalized.document.room_count(),
                    normalized.warnings.len()
                );
                self.document = Some(normalized.document);
                self.warnings = normalized.warnings;
                self.error = None;
                true
            }
            Err(e) => {
                log::warn!("floor plan rejected: {e}");
                self.document = None;
                self.warnings.clear();
                self.error = Some(e);
                false
            }
        }
    }

    fn content(&self) -> CanvasContent<'_> {
        match (&self.document, &self.error) {
            (Some(doc), _) => CanvasContent::Plan(doc),
            (None, Some(err)) => CanvasContent::Invalid(err),
            (None, None) => CanvasContent::Empty,
        }
    }

    fn frame(&self) -> Frame {
        fp_render::render(self.content(), &self.view, &self.theme)
    }

    /// Number of plan items in the current frame; test hook.
    #[cfg(test)]
    fn plan_item_count(&self) -> usize {
        self.frame()
            .items
            .iter()
            .filter(|i| i.layer >= fp_render::Layer::Hallways && i.layer < fp_render::Layer::Overlay)
            .count()
    }
}

/// Canvas edge in whole pixels, clamped to `0..=MAX_CANVAS_PX`.
fn to_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(f64::from(MAX_CANVAS_PX)) as u32
    } else {
        0
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("floor plan WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation functions (no canvas needed) ──────────────────

/// Validate generator output. Returns JSON: `{"ok":true,"warnings":N}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate(text: &str) -> String {
    match fp_core::parse_generator_output(text) {
        Ok(n) => serde_json::json!({ "ok": true, "warnings": n.warnings.len() }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

/// Normalize generator output and return the canonical document JSON.
/// Returns `{"ok":true,"document":{...}}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn normalize_json(text: &str) -> String {
    match fp_core::parse_generator_output(text) {
        Ok(n) => serde_json::json!({ "ok": true, "document": n.document.to_json() }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_render::Layer;
    use pretty_assertions::assert_eq;

    const OFFICE: &str = r#"{"floorPlan":{"dimensions":{"width":10,"height":10},
        "rooms":[{"id":"r1","name":"Office","bounds":{"x":1,"y":1,"width":4,"height":3},"type":"office"}],
        "walls":[],"doors":[],"windows":[]},"description":"x"}"#;

    #[test]
    fn starts_empty() {
        let canvas = FloorPlanCanvas::new(800.0, 600.0);
        assert_eq!(canvas.summary_json(), "null");
        assert_eq!(canvas.last_error(), "");
        assert_eq!(canvas.plan_item_count(), 0);
        assert_eq!(canvas.frame().kind, fp_render::FrameKind::Placeholder);
    }

    #[test]
    fn load_and_summarize() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        assert!(canvas.load_json(OFFICE));
        let summary: serde_json::Value = serde_json::from_str(&canvas.summary_json()).unwrap();
        assert_eq!(summary["roomCount"], 1);
        assert_eq!(summary["badges"], serde_json::json!(["1 rooms", "x"]));
        assert_eq!(canvas.warnings_json(), "[]");
    }

    #[test]
    fn repairs_are_reported_as_warnings() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        assert!(canvas.load_json(r#"{"floorPlan":{"rooms":[],"walls":[],"doors":[]}}"#));
        let warnings: serde_json::Value = serde_json::from_str(&canvas.warnings_json()).unwrap();
        assert_eq!(warnings[0]["rule"], "missing-dimensions");
        assert_eq!(warnings[1]["rule"], "missing-list");
        assert_eq!(warnings[1]["kind"], "list-defaulted");
        assert_eq!(warnings[1]["list"], "windows");
    }

    #[test]
    fn rejected_document_shows_unavailable_state() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        assert!(canvas.load_json(OFFICE));
        assert!(!canvas.load_json(r#"{"error":"quota exceeded"}"#));
        assert_eq!(canvas.last_error(), "floor-plan generator failed: quota exceeded");
        assert_eq!(canvas.summary_json(), "null");
        assert_eq!(canvas.frame().kind, fp_render::FrameKind::Unavailable);

        canvas.clear();
        assert_eq!(canvas.frame().kind, fp_render::FrameKind::Placeholder);
    }

    #[test]
    fn generator_output_accepts_code_fence() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        let fenced = format!("```json\n{OFFICE}\n```");
        assert!(!canvas.load_json(&fenced));
        assert!(canvas.load_generator_output(&fenced));
    }

    #[test]
    fn zoom_steps_and_clamps() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        assert_eq!(canvas.zoom_in(), 125);
        assert_eq!(canvas.set_zoom(1000), 400);
        assert_eq!(canvas.zoom_in(), 400);
        assert_eq!(canvas.set_zoom(30), 30);
        assert_eq!(canvas.zoom_out(), 25);
        assert_eq!(canvas.zoom_scale(), 0.25);
    }

    #[test]
    fn room_lookup_undoes_zoom() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        canvas.load_json(OFFICE);
        assert_eq!(canvas.room_at(60.0, 50.0), "r1");
        canvas.set_zoom(200);
        assert_eq!(canvas.room_at(60.0, 50.0), "");
        assert_eq!(canvas.room_at(120.0, 100.0), "r1");
    }

    #[test]
    fn theme_json_override() {
        let mut canvas = FloorPlanCanvas::new(800.0, 600.0);
        assert!(canvas.set_theme_json(r##"{"background":"#FFFFFF"}"##));
        assert!(!canvas.set_theme_json("{"));
        assert!(canvas.export_svg().contains("fill=\"#FFFFFF\""));
    }

    #[test]
    fn theme_font_family_reaches_svg_export() {
        let mut canvas = FloorPlanCanvas::new(200.0, 200.0);
        assert!(canvas.load_json(OFFICE));
        assert!(canvas.set_theme_json(r#"{"font_family":"Georgia, serif"}"#));
        assert_eq!(canvas.frame().font_family, "Georgia, serif");
        assert!(canvas.export_svg().contains("font-family: Georgia, serif;"));
    }

    #[test]
    fn huge_canvas_is_clamped() {
        let mut canvas = FloorPlanCanvas::new(1e9, 1e9);
        let frame = canvas.frame();
        assert_eq!((frame.width, frame.height), (MAX_CANVAS_PX, MAX_CANVAS_PX));
        // One line per 20 px on each axis, inclusive of both edges.
        let per_axis = (MAX_CANVAS_PX / 20 + 1) as usize;
        assert_eq!(frame.layer(Layer::Grid).count(), 2 * per_axis);

        canvas.resize(f64::INFINITY, 3e12);
        assert_eq!(canvas.frame().width, 0);
        assert_eq!(canvas.frame().height, MAX_CANVAS_PX);
    }

    #[test]
    fn toggling_grid_changes_frame() {
        let mut canvas = FloorPlanCanvas::new(100.0, 100.0);
        let with_grid = canvas.frame().layer(Layer::Grid).count();
        assert!(!canvas.toggle_grid());
        assert_eq!(canvas.frame().layer(Layer::Grid).count(), 0);
        assert!(with_grid > 0);
    }

    #[test]
    fn free_functions_report_json() {
        assert_eq!(validate(OFFICE), r#"{"ok":true,"warnings":0}"#);
        let bad: serde_json::Value = serde_json::from_str(&validate("[]")).unwrap();
        assert_eq!(bad["ok"], false);

        let normalized: serde_json::Value = serde_json::from_str(&normalize_json(OFFICE)).unwrap();
        assert_eq!(normalized["document"]["floorPlan"]["hallways"], serde_json::json!([]));
    }
}
