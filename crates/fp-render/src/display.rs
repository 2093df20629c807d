//! Display list: the ordered draw commands a render pass produces.
//!
//! Backends (tiny-skia raster, Vello scene, SVG, Canvas2D) replay the list in
//! order; later items paint over earlier ones. All coordinates are canvas
//! pixels before the caller's zoom transform.

use crate::theme::DEFAULT_FONT_FAMILY;
use fp_core::{Color, PlanSummary};
use kurbo::{Point, Rect};

/// Paint layer of an item. Declared in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Grid,
    Hallways,
    Rooms,
    Walls,
    Doors,
    Windows,
    /// Placeholder and error cards.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// On/off dash lengths in pixels; `None` is a solid line.
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, on: f64, off: f64) -> Self {
        Self {
            color,
            width,
            dash: Some([on, off]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill the whole surface, replacing whatever was there.
    Clear { color: Color },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, stroke: StrokeStyle },
    /// Rounded rectangle outline, used by placeholder cards.
    StrokeRoundedRect {
        rect: Rect,
        radius: f64,
        stroke: StrokeStyle,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    /// Circular arc. Angles in radians, y axis pointing down, so a positive
    /// sweep turns clockwise on screen.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        stroke: StrokeStyle,
    },
    /// A single line of text, horizontally centered on `anchor.x` and
    /// vertically centered on `anchor.y`.
    Text {
        anchor: Point,
        text: String,
        size: f64,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub op: DrawOp,
}

/// What the canvas is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// No document loaded yet.
    Placeholder,
    /// The document failed validation.
    Unavailable,
    /// A validated document.
    Plan,
}

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub kind: FrameKind,
    pub width: u32,
    pub height: u32,
    pub items: Vec<DrawItem>,
    /// CSS font stack for every `DrawOp::Text` in the frame.
    pub font_family: String,
    /// Badge data; present only for `FrameKind::Plan`.
    pub summary: Option<PlanSummary>,
}

impl Frame {
    pub(crate) fn new(kind: FrameKind, width: u32, height: u32) -> Self {
        Self {
            kind,
            width,
            height,
            items: Vec::new(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            summary: None,
        }
    }

    pub(crate) fn push(&mut self, layer: Layer, op: DrawOp) {
        self.items.push(DrawItem { layer, op });
    }

    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.items.iter().map(|item| &item.op)
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawOp> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.op)
    }

    /// All text drawn in the frame, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Badge texts, or an empty list when no plan is shown.
    pub fn badges(&self) -> Vec<String> {
        self.summary
            .as_ref()
            .map(PlanSummary::badges)
            .unwrap_or_default()
    }
}
