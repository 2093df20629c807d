//! CPU raster backend (tiny-skia).
//!
//! Replays a [`Frame`] onto an RGBA pixel buffer. Deterministic: the same
//! frame always produces the same bytes. Text needs a font context and is not
//! rasterized here; hosts that need labels in pixels use the Canvas2D or SVG
//! backends.

use crate::display::{DrawOp, Frame, StrokeStyle};
use fp_core::Color;
use kurbo::{Arc, BezPath, PathEl, Rect, RoundedRect, Shape, Vec2};
use thiserror::Error;
use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

/// Curve flattening tolerance in pixels.
const TOLERANCE: f64 = 0.1;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cannot allocate a {width}x{height} surface")]
    EmptySurface { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// A pixel buffer the size of the canvas.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::EmptySurface { width, height })?;
        Ok(Self { pixmap })
    }

    /// Allocate a surface sized for `frame` and paint it.
    pub fn from_frame(frame: &Frame) -> Result<Self, RasterError> {
        let mut surface = Self::new(frame.width, frame.height)?;
        surface.paint(frame);
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Paint a full frame. The surface is cleared first, so nothing from a
    /// previous paint survives.
    pub fn paint(&mut self, frame: &Frame) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        for op in frame.ops() {
            self.paint_op(op);
        }
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))
    }

    fn paint_op(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Clear { color } => self.pixmap.fill(to_skia_color(*color)),

            DrawOp::FillRect { rect, color } => {
                let Some(r) = to_skia_rect(rect) else {
                    return;
                };
                self.pixmap
                    .fill_rect(r, &solid_paint(*color), Transform::identity(), None);
            }

            DrawOp::StrokeRect { rect, stroke } => self.stroke_shape(rect, stroke),

            DrawOp::StrokeRoundedRect {
                rect,
                radius,
                stroke,
            } => self.stroke_shape(&RoundedRect::from_rect(*rect, *radius), stroke),

            DrawOp::Line { from, to, stroke } => {
                self.stroke_shape(&kurbo::Line::new(*from, *to), stroke);
            }

            DrawOp::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                stroke,
            } => {
                let arc = Arc {
                    center: *center,
                    radii: Vec2::new(*radius, *radius),
                    start_angle: *start_angle,
                    sweep_angle: *sweep_angle,
                    x_rotation: 0.0,
                };
                self.stroke_shape(&arc, stroke);
            }

            DrawOp::Text { text, anchor, .. } => {
                log::trace!("raster: skipping text {text:?} at ({}, {})", anchor.x, anchor.y);
            }
        }
    }

    fn stroke_shape<S: Shape>(&mut self, shape: &S, style: &StrokeStyle) {
        if !(style.width.is_finite() && style.width > 0.0) {
            return;
        }
        let Some(path) = to_skia_path(&shape.to_path(TOLERANCE)) else {
            return;
        };
        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: style
                .dash
                .and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(style.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn to_skia_rect(rect: &Rect) -> Option<tiny_skia::Rect> {
    let r = rect.abs();
    tiny_skia::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
}

/// kurbo path → tiny-skia path. `None` for empty or degenerate paths.
fn to_skia_path(bez: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in bez.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
