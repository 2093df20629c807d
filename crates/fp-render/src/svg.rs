//! Display list → standalone SVG document.

use crate::display::{DrawOp, Frame, StrokeStyle};
use fp_core::Color;
use kurbo::{Point, Rect};
use std::fmt::Write;

fn svg_color(c: Color) -> String {
    if c.a >= 1.0 {
        c.to_hex()
    } else {
        let [r, g, b, _] = c.to_rgba8();
        format!("rgba({r}, {g}, {b}, {})", c.a)
    }
}

fn stroke_attrs(s: &StrokeStyle) -> String {
    let mut attrs = format!(
        "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
        svg_color(s.color),
        s.width
    );
    if let Some([on, off]) = s.dash {
        let _ = write!(attrs, " stroke-dasharray=\"{on} {off}\"");
    }
    attrs
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A theme string safe inside a `<style>` declaration.
fn css_value(text: &str) -> String {
    let plain: String = text.chars().filter(|c| !matches!(c, '{' | '}' | ';')).collect();
    escape(&plain)
}

/// Serialize a frame as SVG markup sized to the canvas.
pub fn render_svg(frame: &Frame) -> String {
    let (width, height) = (frame.width, frame.height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    svg.push_str("<style>\n");
    let _ = writeln!(svg, "  text {{ font-family: {}; }}", css_value(&frame.font_family));
    svg.push_str("</style>\n");

    for op in frame.ops() {
        write_op(&mut svg, op, width, height);
    }

    svg.push_str("</svg>");
    svg
}

fn write_op(out: &mut String, op: &DrawOp, width: u32, height: u32) {
    match op {
        DrawOp::Clear { color } => {
            // Transparent clear leaves the document background alone.
            if color.a > 0.0 {
                let _ = writeln!(
                    out,
                    "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\" />",
                    svg_color(*color)
                );
            }
        }
        DrawOp::FillRect { rect, color } => {
            let _ = writeln!(out, "  <rect {} fill=\"{}\" />", rect_attrs(rect), svg_color(*color));
        }
        DrawOp::StrokeRect { rect, stroke } => {
            let _ = writeln!(out, "  <rect {} {} />", rect_attrs(rect), stroke_attrs(stroke));
        }
        DrawOp::StrokeRoundedRect {
            rect,
            radius,
            stroke,
        } => {
            let _ = writeln!(
                out,
                "  <rect {} rx=\"{radius}\" ry=\"{radius}\" {} />",
                rect_attrs(rect),
                stroke_attrs(stroke)
            );
        }
        DrawOp::Line { from, to, stroke } => {
            let _ = writeln!(
                out,
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {} />",
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attrs(stroke)
            );
        }
        DrawOp::Arc {
            center,
            radius,
            start_angle,
            sweep_angle,
            stroke,
        } => {
            let start = point_on_circle(*center, *radius, *start_angle);
            let end = point_on_circle(*center, *radius, start_angle + sweep_angle);
            let large = u8::from(sweep_angle.abs() > std::f64::consts::PI);
            let sweep = u8::from(*sweep_angle > 0.0);
            let _ = writeln!(
                out,
                "  <path d=\"M {} {} A {radius} {radius} 0 {large} {sweep} {} {}\" {} />",
                start.x,
                start.y,
                end.x,
                end.y,
                stroke_attrs(stroke)
            );
        }
        DrawOp::Text {
            anchor,
            text,
            size,
            color,
        } => {
            let _ = writeln!(
                out,
                "  <text x=\"{}\" y=\"{}\" font-size=\"{size}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
                anchor.x,
                anchor.y,
                svg_color(*color),
                escape(text)
            );
        }
    }
}

fn rect_attrs(r: &Rect) -> String {
    format!(
        "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        r.x0,
        r.y0,
        r.width(),
        r.height()
    )
}

fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::render_plan;
    use crate::theme::RenderTheme;
    use crate::view::ViewParams;
    use fp_core::{Bounds, EntityId, FloorPlan, FloorPlanDocument, Room, RoomKind};

    fn office_doc(name: &str) -> FloorPlanDocument {
        FloorPlanDocument {
            floor_plan: FloorPlan {
                rooms: vec![Room {
                    id: EntityId::intern("r1"),
                    name: name.into(),
                    bounds: Bounds::new(1.0, 1.0, 4.0, 3.0),
                    kind: RoomKind::Office,
                    square_footage: None,
                }],
                ..FloorPlan::default()
            },
            description: String::new(),
        }
    }

    #[test]
    fn svg_has_canvas_size_and_room() {
        let view = ViewParams::default().with_grid(false);
        let frame = render_plan(&office_doc("Office"), &view, &RenderTheme::light());
        let svg = render_svg(&frame);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\""));
        assert!(svg.contains("<rect x=\"20\" y=\"20\" width=\"80\" height=\"60\" fill=\"#F3E8FF\" />"));
        assert!(svg.contains(">Office</text>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn transparent_background_emits_no_backdrop() {
        let view = ViewParams::default().with_grid(false);
        let frame = render_plan(&FloorPlanDocument::default(), &view, &RenderTheme::light());
        assert!(!render_svg(&frame).contains("<rect"));
    }

    #[test]
    fn text_is_escaped() {
        let view = ViewParams::default().with_grid(false);
        let frame = render_plan(&office_doc("Den <&> Study"), &view, &RenderTheme::light());
        assert!(render_svg(&frame).contains(">Den &lt;&amp;&gt; Study</text>"));
    }

    #[test]
    fn theme_font_family_reaches_the_stylesheet() {
        let view = ViewParams::default().with_grid(false);
        let default = render_svg(&render_plan(&office_doc("Office"), &view, &RenderTheme::light()));
        assert!(default.contains("text { font-family: Inter, system-ui, sans-serif; }"));

        let theme = RenderTheme::from_json(r#"{"font_family":"Georgia, serif"}"#).unwrap();
        let svg = render_svg(&render_plan(&office_doc("Office"), &view, &theme));
        assert!(svg.contains("text { font-family: Georgia, serif; }"));
        assert!(!svg.contains("Inter"));
    }

    #[test]
    fn font_family_cannot_break_out_of_the_rule() {
        let theme = RenderTheme::from_json(r#"{"font_family":"x; } rect { fill: red"}"#).unwrap();
        let svg = render_svg(&render_plan(&FloorPlanDocument::default(), &ViewParams::new(40, 40), &theme));
        assert!(svg.contains("text { font-family: x  rect  fill: red; }"));
    }

    #[test]
    fn grid_alpha_uses_rgba() {
        let frame = render_plan(
            &FloorPlanDocument::default(),
            &ViewParams::new(40, 40),
            &RenderTheme::dark(),
        );
        let svg = render_svg(&frame);
        assert!(svg.contains("fill=\"#1C1C1E\""));
        assert!(svg.contains("stroke=\"rgba(255, 255, 255, 0.08)\""));
    }
}
