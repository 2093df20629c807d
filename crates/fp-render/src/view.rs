//! Per-render view parameters.
//!
//! Owned by the host UI and passed by value into every render call. The
//! renderer keeps no view state of its own.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

/// Background grid pitch in pixels. Independent of zoom.
pub const GRID_PITCH_PX: f64 = 20.0;
/// Pixels per document grid unit, before zoom.
pub const PX_PER_UNIT: f64 = 20.0;

/// Largest canvas edge the pipeline will paint, in pixels.
pub const MAX_CANVAS_PX: u32 = 8192;

pub const MIN_ZOOM_PERCENT: i32 = 25;
pub const MAX_ZOOM_PERCENT: i32 = 400;
pub const ZOOM_STEP_PERCENT: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewParams {
    pub grid_visible: bool,
    /// Applied by the caller as a surface-level transform, never inside the
    /// pipeline's pixel math.
    pub zoom_percent: i32,
    pub canvas_width_px: u32,
    pub canvas_height_px: u32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            grid_visible: true,
            zoom_percent: 100,
            canvas_width_px: 800,
            canvas_height_px: 600,
        }
    }
}

impl ViewParams {
    /// Canvas edges are clamped to [`MAX_CANVAS_PX`].
    pub fn new(canvas_width_px: u32, canvas_height_px: u32) -> Self {
        Self {
            canvas_width_px: canvas_width_px.min(MAX_CANVAS_PX),
            canvas_height_px: canvas_height_px.min(MAX_CANVAS_PX),
            ..Self::default()
        }
    }

    /// Canvas size as painted, clamped to [`MAX_CANVAS_PX`] even when the
    /// fields were set directly or deserialized.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas_width_px.min(MAX_CANVAS_PX),
            self.canvas_height_px.min(MAX_CANVAS_PX),
        )
    }

    pub fn with_grid(mut self, visible: bool) -> Self {
        self.grid_visible = visible;
        self
    }

    pub fn with_zoom(mut self, percent: i32) -> Self {
        self.set_zoom(percent);
        self
    }

    /// Set the zoom, clamped to [25, 400].
    pub fn set_zoom(&mut self, percent: i32) {
        self.zoom_percent = percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom_percent.saturating_add(ZOOM_STEP_PERCENT));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom_percent.saturating_sub(ZOOM_STEP_PERCENT));
    }

    /// Zoom as a scale factor (100% → 1.0). Out-of-range values are clamped.
    pub fn zoom_scale(&self) -> f64 {
        f64::from(self.zoom_percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT)) / 100.0
    }

    /// The caller-side zoom transform, for hosts that composite the frame
    /// themselves.
    pub fn zoom_transform(&self) -> Affine {
        Affine::scale(self.zoom_scale())
    }
}
