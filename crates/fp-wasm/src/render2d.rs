//! Canvas2D backend.
//!
//! Replays a [`Frame`] onto an HTML `<canvas>` via `CanvasRenderingContext2d`.
//! Zoom is a surface-level transform over the whole frame, grid included.

use fp_core::Color;
use fp_render::{DrawOp, Frame, StrokeStyle};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Paint a full frame. `zoom` is the scale factor (1.0 = 100%).
pub fn replay(ctx: &CanvasRenderingContext2d, frame: &Frame, zoom: f64) {
    let (w, h) = (f64::from(frame.width), f64::from(frame.height));

    ctx.save();
    // Reset first so the clear covers the whole element at any zoom.
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, w * zoom.max(1.0), h * zoom.max(1.0));
    let _ = ctx.set_transform(zoom, 0.0, 0.0, zoom, 0.0, 0.0);

    for op in frame.ops() {
        draw_op(ctx, op, w, h, &frame.font_family);
    }

    ctx.restore();
}

fn draw_op(ctx: &CanvasRenderingContext2d, op: &DrawOp, w: f64, h: f64, font_family: &str) {
    match op {
        DrawOp::Clear { color } => {
            ctx.clear_rect(0.0, 0.0, w, h);
            if color.a > 0.0 {
                ctx.set_fill_style_str(&css_color(*color));
                ctx.fill_rect(0.0, 0.0, w, h);
            }
        }

        DrawOp::FillRect { rect, color } => {
            ctx.set_fill_style_str(&css_color(*color));
            ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
        }

        DrawOp::StrokeRect { rect, stroke } => {
            apply_stroke(ctx, stroke);
            ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
        }

        DrawOp::StrokeRoundedRect {
            rect,
            radius,
            stroke,
        } => {
            apply_stroke(ctx, stroke);
            rounded_rect_path(ctx, rect.x0, rect.y0, rect.width(), rect.height(), *radius);
            ctx.stroke();
        }

        DrawOp::Line { from, to, stroke } => {
            apply_stroke(ctx, stroke);
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }

        DrawOp::Arc {
            center,
            radius,
            start_angle,
            sweep_angle,
            stroke,
        } => {
            apply_stroke(ctx, stroke);
            ctx.begin_path();
            let _ = ctx.arc_with_anticlockwise(
                center.x,
                center.y,
                *radius,
                *start_angle,
                start_angle + sweep_angle,
                *sweep_angle < 0.0,
            );
            ctx.stroke();
        }

        DrawOp::Text {
            anchor,
            text,
            size,
            color,
        } => {
            ctx.set_font(&format!("{size}px {font_family}"));
            ctx.set_fill_style_str(&css_color(*color));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let _ = ctx.fill_text(text, anchor.x, anchor.y);
        }
    }
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &StrokeStyle) {
    ctx.set_stroke_style_str(&css_color(stroke.color));
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap("butt");
    ctx.set_line_join("miter");
    let dash = match stroke.dash {
        Some([on, off]) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
        None => js_sys::Array::new(),
    };
    let _ = ctx.set_line_dash(&dash);
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.arc_to(x + w, y, x + w, y + r, r).unwrap_or(());
    ctx.line_to(x + w, y + h - r);
    ctx.arc_to(x + w, y + h, x + w - r, y + h, r).unwrap_or(());
    ctx.line_to(x + r, y + h);
    ctx.arc_to(x, y + h, x, y + h - r, r).unwrap_or(());
    ctx.line_to(x, y + r);
    ctx.arc_to(x, y, x + r, y, r).unwrap_or(());
    ctx.close_path();
}

/// CSS color string: `#RRGGBB` when opaque, `rgba(...)` otherwise.
fn css_color(c: Color) -> String {
    if c.a >= 1.0 {
        c.to_hex()
    } else {
        let [r, g, b, _] = c.to_rgba8();
        format!("rgba({r}, {g}, {b}, {})", c.a)
    }
}
