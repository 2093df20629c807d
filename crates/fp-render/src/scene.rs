//! Display list → Vello drawing commands.
//!
//! GPU hosts build a fresh `vello::Scene` per frame, call [`paint_scene`] and
//! present it via wgpu. The caller's affine carries the zoom transform.

use crate::display::{DrawOp, Frame, StrokeStyle};
use kurbo::{Affine, Arc, Cap, Join, Line, Rect, RoundedRect, Stroke as KurboStroke, Vec2};
use peniko::{Color, Fill};
use vello::Scene;

/// Paint a frame into a Vello scene.
///
/// Call once per frame with a freshly-reset `Scene`.
pub fn paint_scene(scene: &mut Scene, frame: &Frame, transform: Affine) {
    let canvas = Rect::new(0.0, 0.0, f64::from(frame.width), f64::from(frame.height));

    for op in frame.ops() {
        match op {
            DrawOp::Clear { color } => {
                scene.fill(Fill::NonZero, transform, to_peniko(*color), None, &canvas);
            }

            DrawOp::FillRect { rect, color } => {
                scene.fill(Fill::NonZero, transform, to_peniko(*color), None, rect);
            }

            DrawOp::StrokeRect { rect, stroke } => stroke_shape(scene, transform, rect, stroke),

            DrawOp::StrokeRoundedRect {
                rect,
                radius,
                stroke,
            } => stroke_shape(
                scene,
                transform,
                &RoundedRect::from_rect(*rect, *radius),
                stroke,
            ),

            DrawOp::Line { from, to, stroke } => {
                stroke_shape(scene, transform, &Line::new(*from, *to), stroke);
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
                stroke_shape(scene, transform, &arc, stroke);
            }

            DrawOp::Text { text, anchor, .. } => {
                log::trace!("TEXT {:?} at ({}, {})", text, anchor.x, anchor.y);
                // Full text shaping requires a font context; deferred to font milestone.
            }
        }
    }
}

fn stroke_shape<S: kurbo::Shape>(
    scene: &mut Scene,
    transform: Affine,
    shape: &S,
    style: &StrokeStyle,
) {
    if !(style.width.is_finite() && style.width > 0.0) {
        return;
    }
    let mut stroke = KurboStroke::new(style.width)
        .with_caps(Cap::Butt)
        .with_join(Join::Miter);
    if let Some([on, off]) = style.dash {
        stroke = stroke.with_dashes(0.0, [on, off]);
    }
    scene.stroke(&stroke, transform, to_peniko(style.color), None, shape);
}

fn to_peniko(color: fp_core::Color) -> Color {
    let [r, g, b, a] = color.to_rgba8();
    Color::from_rgba8(r, g, b, a)
}
