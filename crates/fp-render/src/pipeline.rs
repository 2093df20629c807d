//! Floor-plan document → display list.
//!
//! A single synchronous pass with a fixed layer order:
//! clear → grid → hallways → rooms → walls → doors → windows.
//! Within a layer, document list order is the only tie-break. No spatial
//! reasoning happens here: geometry is painted exactly as declared, and
//! entities with degenerate geometry are skipped without affecting the rest.
//! Geometry is clipped to a reach rectangle a few canvas diagonals around
//! the canvas, so absurd coordinates never reach a backend.

use crate::display::{DrawOp, Frame, FrameKind, Layer, StrokeStyle};
use crate::theme::RenderTheme;
use crate::view::{GRID_PITCH_PX, PX_PER_UNIT, ViewParams};
use fp_core::label::{LabelLine, LabelSize, label_lines};
use fp_core::summary::truncate_description;
use fp_core::{
    Bounds, Door, DoorSwing, FloorPlanDocument, PlanSummary, Room, ValidationError, Wall, Window,
};
use kurbo::{Point, Rect, Size};
use std::f64::consts::FRAC_PI_2;

/// Hallway border dash, on/off in pixels.
const HALLWAY_DASH: [f64; 2] = [5.0, 5.0];
const LINE_HEIGHT: f64 = 1.2;
/// Paintable margin around the canvas, in canvas diagonals.
const REACH_DIAGONALS: f64 = 4.0;

const CARD_SIZE: Size = Size::new(384.0, 256.0);
const CARD_MARGIN: f64 = 8.0;
const CARD_RADIUS: f64 = 8.0;
const CARD_TITLE_SIZE: f64 = 18.0;
const CARD_TEXT_SIZE: f64 = 13.0;
const ERROR_DETAIL_LIMIT: usize = 80;

/// What to show on the canvas.
#[derive(Debug, Clone, Copy)]
pub enum CanvasContent<'a> {
    /// Nothing generated yet.
    Empty,
    Plan(&'a FloorPlanDocument),
    /// The last document failed validation.
    Invalid(&'a ValidationError),
}

/// Render whatever the canvas currently holds.
pub fn render(content: CanvasContent<'_>, view: &ViewParams, theme: &RenderTheme) -> Frame {
    match content {
        CanvasContent::Empty => render_placeholder(view, theme),
        CanvasContent::Plan(doc) => render_plan(doc, view, theme),
        CanvasContent::Invalid(err) => render_unavailable(err, view, theme),
    }
}

/// Render a validated document. Never fails; bad entities are skipped.
pub fn render_plan(doc: &FloorPlanDocument, view: &ViewParams, theme: &RenderTheme) -> Frame {
    let mut frame = begin_frame(FrameKind::Plan, view, theme);
    let plan = &doc.floor_plan;

    for hallway in &plan.hallways {
        paint_hallway(&mut frame, hallway, theme);
    }
    for room in &plan.rooms {
        paint_room(&mut frame, room, theme);
    }
    for wall in &plan.walls {
        paint_wall(&mut frame, wall, theme);
    }
    for door in &plan.doors {
        paint_door(&mut frame, door, theme);
    }
    for window in &plan.windows {
        paint_window(&mut frame, window, theme);
    }

    frame.summary = Some(PlanSummary::of(doc));
    log::debug!(
        "rendered floor plan: {} draw ops on {}x{} canvas",
        frame.items.len(),
        frame.width,
        frame.height
    );
    frame
}

/// The "no document" state: grid plus a dashed card inviting generation.
pub fn render_placeholder(view: &ViewParams, theme: &RenderTheme) -> Frame {
    let mut frame = begin_frame(FrameKind::Placeholder, view, theme);
    paint_card(
        &mut frame,
        theme.placeholder_border,
        &[
            ("AI Floor Plan Canvas", CARD_TITLE_SIZE, theme.placeholder_text),
            (
                "Use the AI generator to create your floor plan",
                CARD_TEXT_SIZE,
                theme.placeholder_text,
            ),
            (
                "or start drawing manually with the tools",
                CARD_TEXT_SIZE,
                theme.placeholder_text,
            ),
        ],
    );
    frame
}

/// The "could not display" state for a document that failed validation.
pub fn render_unavailable(err: &ValidationError, view: &ViewParams, theme: &RenderTheme) -> Frame {
    let mut frame = begin_frame(FrameKind::Unavailable, view, theme);
    let detail = truncate_description(&err.to_string(), ERROR_DETAIL_LIMIT);
    paint_card(
        &mut frame,
        theme.error_text,
        &[
            ("Could not display floor plan", CARD_TITLE_SIZE, theme.error_text),
            (err.user_message(), CARD_TEXT_SIZE, theme.placeholder_text),
            (detail.as_str(), CARD_TEXT_SIZE, theme.placeholder_text),
        ],
    );
    frame
}

// ─── Frame setup ─────────────────────────────────────────────────────────

fn begin_frame(kind: FrameKind, view: &ViewParams, theme: &RenderTheme) -> Frame {
    let (width, height) = view.canvas_size();
    let mut frame = Frame::new(kind, width, height);
    frame.font_family = theme.font_family.clone();
    frame.push(
        Layer::Background,
        DrawOp::Clear {
            color: theme.background,
        },
    );
    if view.grid_visible {
        paint_grid(&mut frame, theme);
    }
    frame
}

fn paint_grid(frame: &mut Frame, theme: &RenderTheme) {
    let width = f64::from(frame.width);
    let height = f64::from(frame.height);
    let stroke = StrokeStyle::solid(theme.grid, theme.grid_width);

    let mut x = 0.0;
    while x <= width {
        frame.push(
            Layer::Grid,
            DrawOp::Line {
                from: Point::new(x, 0.0),
                to: Point::new(x, height),
                stroke,
            },
        );
        x += GRID_PITCH_PX;
    }

    let mut y = 0.0;
    while y <= height {
        frame.push(
            Layer::Grid,
            DrawOp::Line {
                from: Point::new(0.0, y),
                to: Point::new(width, y),
                stroke,
            },
        );
        y += GRID_PITCH_PX;
    }
}

// ─── Entity painters ─────────────────────────────────────────────────────

fn paint_hallway(frame: &mut Frame, hallway: &Room, theme: &RenderTheme) {
    let Some(rect) = rect_px(&hallway.bounds) else {
        log::trace!("skipping hallway {} with degenerate bounds", hallway.id);
        return;
    };
    let Some(area) = clip_rect(rect, reach(frame)) else {
        log::trace!("skipping hallway {} beyond the canvas", hallway.id);
        return;
    };
    frame.push(
        Layer::Hallways,
        DrawOp::FillRect {
            rect: area,
            color: theme.hallway_fill,
        },
    );
    frame.push(
        Layer::Hallways,
        DrawOp::StrokeRect {
            rect: area,
            stroke: StrokeStyle::dashed(
                theme.hallway_border,
                theme.hallway_border_width,
                HALLWAY_DASH[0],
                HALLWAY_DASH[1],
            ),
        },
    );

    let name = hallway.name.trim();
    if !name.is_empty() {
        let line = LabelLine {
            text: name.to_string(),
            size: LabelSize::Primary,
        };
        paint_label(frame, Layer::Hallways, rect.center(), &[line], theme);
    }
}

fn paint_room(frame: &mut Frame, room: &Room, theme: &RenderTheme) {
    let Some(rect) = rect_px(&room.bounds) else {
        log::trace!("skipping room {} with degenerate bounds", room.id);
        return;
    };
    let Some(area) = clip_rect(rect, reach(frame)) else {
        log::trace!("skipping room {} beyond the canvas", room.id);
        return;
    };
    frame.push(
        Layer::Rooms,
        DrawOp::FillRect {
            rect: area,
            color: theme.rooms.fill_for(&room.kind),
        },
    );
    let (border, width) = theme.room_border_for(&room.kind);
    frame.push(
        Layer::Rooms,
        DrawOp::StrokeRect {
            rect: area,
            stroke: StrokeStyle::solid(border, width),
        },
    );

    let lines = label_lines(&room.name, room.square_footage);
    paint_label(frame, Layer::Rooms, rect.center(), &lines, theme);
}

fn paint_wall(frame: &mut Frame, wall: &Wall, theme: &RenderTheme) {
    if wall.is_degenerate() {
        log::trace!("skipping degenerate wall {}", wall.id);
        return;
    }
    let Some((from, to)) = clip_segment(to_px(wall.start), to_px(wall.end), reach(frame)) else {
        log::trace!("skipping wall {} beyond the canvas", wall.id);
        return;
    };
    frame.push(
        Layer::Walls,
        DrawOp::Line {
            from,
            to,
            stroke: StrokeStyle::solid(theme.wall, theme.wall_width),
        },
    );
}

fn paint_door(frame: &mut Frame, door: &Door, theme: &RenderTheme) {
    if !door.is_drawable() {
        log::trace!("skipping door {} with degenerate geometry", door.id);
        return;
    }
    let origin = to_px(door.position);
    let leaf = door.width * PX_PER_UNIT;
    // The swing arc is flattened by the backends; its radius must stay bounded.
    if !reach(frame).contains(origin) || !leaf.is_finite() || leaf > reach_margin(frame) {
        log::trace!("skipping door {} beyond the canvas", door.id);
        return;
    }
    let stroke = StrokeStyle::solid(theme.door, theme.door_width);

    frame.push(
        Layer::Doors,
        DrawOp::Line {
            from: origin,
            to: Point::new(origin.x + leaf, origin.y),
            stroke,
        },
    );
    if door.swing == DoorSwing::Inward {
        frame.push(
            Layer::Doors,
            DrawOp::Arc {
                center: origin,
                radius: leaf,
                start_angle: 0.0,
                sweep_angle: FRAC_PI_2,
                stroke,
            },
        );
    }
}

fn paint_window(frame: &mut Frame, window: &Window, theme: &RenderTheme) {
    if !window.is_drawable() {
        log::trace!("skipping window {} with degenerate geometry", window.id);
        return;
    }
    let origin = to_px(window.position);
    let end = Point::new(origin.x + window.width * PX_PER_UNIT, origin.y);
    let Some((from, to)) = clip_segment(origin, end, reach(frame)) else {
        log::trace!("skipping window {} beyond the canvas", window.id);
        return;
    };
    frame.push(
        Layer::Windows,
        DrawOp::Line {
            from,
            to,
            stroke: StrokeStyle::solid(theme.window, theme.window_width),
        },
    );
}

// ─── Labels and cards ────────────────────────────────────────────────────

/// Stack label lines so the block is vertically centered on `center`.
fn paint_label(
    frame: &mut Frame,
    layer: Layer,
    center: Point,
    lines: &[LabelLine],
    theme: &RenderTheme,
) {
    let size_of = |line: &LabelLine| match line.size {
        LabelSize::Primary => theme.label_size,
        LabelSize::Secondary => theme.secondary_label_size,
    };
    let block: f64 = lines.iter().map(|l| size_of(l) * LINE_HEIGHT).sum();

    let mut offset = 0.0;
    for line in lines {
        let size = size_of(line);
        let line_height = size * LINE_HEIGHT;
        frame.push(
            layer,
            DrawOp::Text {
                anchor: Point::new(center.x, center.y + block_line_offset(offset, line_height, block)),
                text: line.text.clone(),
                size,
                color: theme.label,
            },
        );
        offset += line_height;
    }
}

fn paint_card(
    frame: &mut Frame,
    border: fp_core::Color,
    lines: &[(&str, f64, fp_core::Color)],
) {
    let canvas = Size::new(f64::from(frame.width), f64::from(frame.height));
    let size = Size::new(
        CARD_SIZE.width.min(canvas.width - 2.0 * CARD_MARGIN).max(0.0),
        CARD_SIZE.height.min(canvas.height - 2.0 * CARD_MARGIN).max(0.0),
    );
    let center = Point::new(canvas.width / 2.0, canvas.height / 2.0);
    let rect = Rect::from_center_size(center, size);

    if rect.area() > 0.0 {
        frame.push(
            Layer::Overlay,
            DrawOp::StrokeRoundedRect {
                rect,
                radius: CARD_RADIUS,
                stroke: StrokeStyle::dashed(border, 2.0, 4.0, 4.0),
            },
        );
    }

    let block: f64 = lines.iter().map(|(_, size, _)| size * LINE_HEIGHT).sum();
    let mut offset = 0.0;
    for &(text, size, color) in lines {
        let line_height = size * LINE_HEIGHT;
        frame.push(
            Layer::Overlay,
            DrawOp::Text {
                anchor: Point::new(center.x, center.y + block_line_offset(offset, line_height, block)),
                text: text.to_string(),
                size,
                color,
            },
        );
        offset += line_height;
    }
}

/// Vertical offset of a line's middle from the center of its text block.
/// A single-line block lands exactly on the center.
fn block_line_offset(offset_in_block: f64, line_height: f64, block_height: f64) -> f64 {
    offset_in_block + line_height / 2.0 - block_height / 2.0
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn to_px(p: fp_core::Point) -> Point {
    Point::new(p.x * PX_PER_UNIT, p.y * PX_PER_UNIT)
}

fn reach_margin(frame: &Frame) -> f64 {
    let diagonal = f64::from(frame.width).hypot(f64::from(frame.height));
    REACH_DIAGONALS * diagonal.max(1.0)
}

/// Everything painted lies inside this rectangle.
fn reach(frame: &Frame) -> Rect {
    let r = reach_margin(frame);
    Rect::new(-r, -r, f64::from(frame.width) + r, f64::from(frame.height) + r)
}

fn clip_rect(rect: Rect, bounds: Rect) -> Option<Rect> {
    let clipped = rect.intersect(bounds);
    (clipped.area() > 0.0).then_some(clipped)
}

/// Liang-Barsky clip of a segment against `bounds`. Endpoints already inside
/// are returned unchanged; `None` when the segment misses or its extent
/// overflows.
fn clip_segment(from: Point, to: Point, bounds: Rect) -> Option<(Point, Point)> {
    if !(from.is_finite() && to.is_finite()) {
        return None;
    }
    let delta = to - from;
    if !delta.is_finite() {
        return None;
    }
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-delta.x, from.x - bounds.x0),
        (delta.x, bounds.x1 - from.x),
        (-delta.y, from.y - bounds.y0),
        (delta.y, bounds.y1 - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    // Far-off endpoints lose precision in `from + delta * t`; clamp back in.
    let onto = |p: Point| Point::new(p.x.clamp(bounds.x0, bounds.x1), p.y.clamp(bounds.y0, bounds.y1));
    let start = if t0 > 0.0 { onto(from + delta * t0) } else { from };
    let end = if t1 < 1.0 { onto(from + delta * t1) } else { to };
    Some((start, end))
}

/// Pixel rectangle for drawable bounds; `None` for zero-extent ones.
pub(crate) fn rect_px(b: &Bounds) -> Option<Rect> {
    if !b.is_drawable() {
        return None;
    }
    let rect = Rect::new(
        b.x * PX_PER_UNIT,
        b.y * PX_PER_UNIT,
        (b.x + b.width) * PX_PER_UNIT,
        (b.y + b.height) * PX_PER_UNIT,
    );
    rect.is_finite().then_some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::{EntityId, FloorPlan, RoomKind};
    use pretty_assertions::assert_eq;

    fn room(name: &str, kind: RoomKind, bounds: Bounds) -> Room {
        Room {
            id: EntityId::intern(name),
            name: name.to_string(),
            bounds,
            kind,
            square_footage: None,
        }
    }

    fn doc_with(plan: FloorPlan) -> FloorPlanDocument {
        FloorPlanDocument {
            floor_plan: plan,
            description: String::new(),
        }
    }

    fn no_grid() -> ViewParams {
        ViewParams::default().with_grid(false)
    }

    #[test]
    fn empty_plan_is_clear_plus_grid() {
        let frame = render_plan(&FloorPlanDocument::default(), &ViewParams::default(), &RenderTheme::light());
        assert!(frame.items.iter().all(|i| matches!(i.layer, Layer::Background | Layer::Grid)));
        // 800 / 20 + 1 vertical, 600 / 20 + 1 horizontal lines.
        assert_eq!(frame.layer(Layer::Grid).count(), 41 + 31);
        assert_eq!(frame.badges(), vec!["0 rooms".to_string()]);
    }

    #[test]
    fn grid_hidden_leaves_only_clear() {
        let frame = render_plan(&FloorPlanDocument::default(), &no_grid(), &RenderTheme::light());
        assert_eq!(frame.items.len(), 1);
        assert!(matches!(frame.items[0].op, DrawOp::Clear { .. }));
    }

    #[test]
    fn room_maps_grid_units_to_pixels() {
        let doc = doc_with(FloorPlan {
            rooms: vec![room("Office", RoomKind::Office, Bounds::new(1.0, 1.0, 4.0, 3.0))],
            ..FloorPlan::default()
        });
        let theme = RenderTheme::light();
        let frame = render_plan(&doc, &no_grid(), &theme);
        let fills: Vec<_> = frame.layer(Layer::Rooms).collect();
        assert_eq!(
            fills[0],
            &DrawOp::FillRect {
                rect: Rect::new(20.0, 20.0, 100.0, 80.0),
                color: theme.rooms.office,
            }
        );
        assert_eq!(
            fills[2],
            &DrawOp::Text {
                anchor: Point::new(60.0, 50.0),
                text: "Office".into(),
                size: 14.0,
                color: theme.label,
            }
        );
    }

    #[test]
    fn layers_follow_fixed_order_regardless_of_input() {
        let doc = doc_with(FloorPlan {
            hallways: vec![room("Hall", RoomKind::Circulation, Bounds::new(0.0, 0.0, 2.0, 6.0))],
            rooms: vec![room("Den", RoomKind::Living, Bounds::new(2.0, 0.0, 4.0, 4.0))],
            walls: vec![Wall {
                id: EntityId::intern("w"),
                start: fp_core::Point::new(0.0, 0.0),
                end: fp_core::Point::new(6.0, 0.0),
                thickness: 0.5,
            }],
            doors: vec![Door {
                id: EntityId::intern("d"),
                position: fp_core::Point::new(3.0, 4.0),
                wall_id: None,
                width: 1.0,
                swing: DoorSwing::Inward,
                kind: None,
            }],
            windows: vec![Window {
                id: EntityId::intern("win"),
                position: fp_core::Point::new(1.0, 0.0),
                wall_id: Some(EntityId::intern("w")),
                width: 1.0,
                dimensions: None,
            }],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &ViewParams::default(), &RenderTheme::light());
        let layers: Vec<Layer> = frame.items.iter().map(|i| i.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted, "items must be emitted in layer order");
        for layer in [Layer::Hallways, Layer::Rooms, Layer::Walls, Layer::Doors, Layer::Windows] {
            assert!(layers.contains(&layer), "missing {layer:?}");
        }
    }

    #[test]
    fn door_draws_leaf_and_quarter_arc() {
        let doc = doc_with(FloorPlan {
            doors: vec![Door {
                id: EntityId::intern("d"),
                position: fp_core::Point::new(2.0, 3.0),
                wall_id: Some(EntityId::intern("missing-wall")),
                width: 1.5,
                swing: DoorSwing::Inward,
                kind: None,
            }],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &RenderTheme::light());
        let ops: Vec<_> = frame.layer(Layer::Doors).collect();
        assert_eq!(ops.len(), 2);
        match ops[0] {
            DrawOp::Line { from, to, .. } => {
                assert_eq!(*from, Point::new(40.0, 60.0));
                assert_eq!(*to, Point::new(70.0, 60.0));
            }
            other => panic!("expected leaf line, got {other:?}"),
        }
        match ops[1] {
            DrawOp::Arc { center, radius, start_angle, sweep_angle, .. } => {
                assert_eq!(*center, Point::new(40.0, 60.0));
                assert_eq!(*radius, 30.0);
                assert_eq!(*start_angle, 0.0);
                assert_eq!(*sweep_angle, FRAC_PI_2);
            }
            other => panic!("expected swing arc, got {other:?}"),
        }
    }

    #[test]
    fn non_inward_swing_omits_arc() {
        let doc = doc_with(FloorPlan {
            doors: vec![Door {
                id: EntityId::intern("d"),
                position: fp_core::Point::new(2.0, 3.0),
                wall_id: None,
                width: 1.0,
                swing: DoorSwing::Other("sliding".into()),
                kind: None,
            }],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &RenderTheme::light());
        assert_eq!(frame.layer(Layer::Doors).count(), 1);
    }

    #[test]
    fn degenerate_entities_are_skipped_not_fatal() {
        let doc = doc_with(FloorPlan {
            rooms: vec![
                room("Bad", RoomKind::Kitchen, Bounds::new(1.0, 1.0, -5.0, 3.0)),
                room("Good", RoomKind::Kitchen, Bounds::new(1.0, 1.0, 2.0, 2.0)),
            ],
            walls: vec![Wall {
                id: EntityId::intern("w0"),
                start: fp_core::Point::new(3.0, 3.0),
                end: fp_core::Point::new(3.0, 3.0),
                thickness: 0.5,
            }],
            windows: vec![Window {
                id: EntityId::intern("win0"),
                position: fp_core::Point::new(f64::NAN, 0.0),
                wall_id: None,
                width: 1.0,
                dimensions: None,
            }],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &RenderTheme::light());
        assert_eq!(frame.texts(), vec!["Good"]);
        assert_eq!(frame.layer(Layer::Walls).count(), 0);
        assert_eq!(frame.layer(Layer::Windows).count(), 0);
    }

    #[test]
    fn split_label_stacks_two_lines_below_each_other() {
        let doc = doc_with(FloorPlan {
            rooms: vec![room(
                "Bedroom 1 (12' x 10')",
                RoomKind::Bedroom,
                Bounds::new(0.0, 0.0, 6.0, 5.0),
            )],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &RenderTheme::light());
        assert_eq!(frame.texts(), vec!["Bedroom 1", "(12' x 10')"]);

        let anchors: Vec<(f64, f64)> = frame
            .ops()
            .filter_map(|op| match op {
                DrawOp::Text { anchor, size, .. } => Some((anchor.y, *size)),
                _ => None,
            })
            .collect();
        assert!(anchors[0].0 < anchors[1].0, "dimension line must be below the name");
        assert!(anchors[1].1 < anchors[0].1, "dimension line uses the smaller font");
    }

    #[test]
    fn entry_room_gets_accent_border() {
        let theme = RenderTheme::light();
        let doc = doc_with(FloorPlan {
            rooms: vec![room("Foyer", RoomKind::Entry, Bounds::new(0.0, 0.0, 2.0, 2.0))],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &theme);
        let stroke = frame
            .layer(Layer::Rooms)
            .find_map(|op| match op {
                DrawOp::StrokeRect { stroke, .. } => Some(*stroke),
                _ => None,
            })
            .unwrap();
        assert_eq!(stroke.color, theme.entry_border);
        assert_eq!(stroke.width, theme.entry_border_width);
    }

    #[test]
    fn hallway_uses_fixed_treatment_regardless_of_type() {
        let theme = RenderTheme::light();
        let doc = doc_with(FloorPlan {
            hallways: vec![room("Corridor", RoomKind::Kitchen, Bounds::new(0.0, 0.0, 1.0, 5.0))],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &theme);
        let ops: Vec<_> = frame.layer(Layer::Hallways).collect();
        assert_eq!(
            ops[0],
            &DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 20.0, 100.0),
                color: theme.hallway_fill,
            }
        );
        match ops[1] {
            DrawOp::StrokeRect { stroke, .. } => assert_eq!(stroke.dash, Some([5.0, 5.0])),
            other => panic!("expected dashed border, got {other:?}"),
        }
    }

    #[test]
    fn placeholder_and_unavailable_states_are_distinct() {
        let view = ViewParams::default();
        let theme = RenderTheme::light();

        let empty = render(CanvasContent::Empty, &view, &theme);
        assert_eq!(empty.kind, FrameKind::Placeholder);
        assert!(empty.summary.is_none());
        assert_eq!(empty.texts()[0], "AI Floor Plan Canvas");

        let err = ValidationError::MalformedDocument("missing `floorPlan`".into());
        let invalid = render(CanvasContent::Invalid(&err), &view, &theme);
        assert_eq!(invalid.kind, FrameKind::Unavailable);
        assert_eq!(invalid.texts()[0], "Could not display floor plan");

        let blank = FloorPlanDocument::default();
        let plan = render(CanvasContent::Plan(&blank), &view, &theme);
        assert_eq!(plan.kind, FrameKind::Plan);
        assert_eq!(plan.badges(), vec!["0 rooms".to_string()]);
    }

    #[test]
    fn door_leaf_far_beyond_the_canvas_is_skipped() {
        let door = |id: &str, x: f64, width: f64| Door {
            id: EntityId::intern(id),
            position: fp_core::Point::new(x, 1.0),
            wall_id: None,
            width,
            swing: DoorSwing::Inward,
            kind: None,
        };
        let doc = doc_with(FloorPlan {
            doors: vec![door("huge", 1.0, 1e60), door("far", 1e12, 1.0), door("ok", 1.0, 1.0)],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &RenderTheme::light());
        let radii: Vec<f64> = frame
            .layer(Layer::Doors)
            .filter_map(|op| match op {
                DrawOp::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![20.0]);
        assert_eq!(frame.layer(Layer::Doors).count(), 2);
    }

    #[test]
    fn huge_walls_windows_and_rooms_are_clipped_to_reach() {
        let doc = doc_with(FloorPlan {
            rooms: vec![room("Vast", RoomKind::Living, Bounds::new(-1e30, 0.0, 2e30, 1.0))],
            walls: vec![Wall {
                id: EntityId::intern("w"),
                start: fp_core::Point::new(-1e300, 1.0),
                end: fp_core::Point::new(1e300, 1.0),
                thickness: 0.5,
            }],
            windows: vec![Window {
                id: EntityId::intern("win"),
                position: fp_core::Point::new(1.0, 2.0),
                wall_id: None,
                width: 1e40,
                dimensions: None,
            }],
            ..FloorPlan::default()
        });
        let frame = render_plan(&doc, &no_grid(), &RenderTheme::light());
        // 4 diagonals of an 800x600 canvas.
        let reach = Rect::new(-4000.0, -4000.0, 4800.0, 4600.0);

        for op in frame.ops() {
            match op {
                DrawOp::Line { from, to, .. } => {
                    assert!(reach.inflate(1e-6, 1e-6).contains(*from), "{from:?}");
                    assert!(reach.inflate(1e-6, 1e-6).contains(*to), "{to:?}");
                }
                DrawOp::FillRect { rect, .. } => {
                    assert_eq!(*rect, Rect::new(-4000.0, 0.0, 4800.0, 20.0));
                }
                _ => {}
            }
        }
        assert_eq!(frame.layer(Layer::Walls).count(), 1);
        assert_eq!(frame.layer(Layer::Windows).count(), 1);
        let window_start = frame.layer(Layer::Windows).find_map(|op| match op {
            DrawOp::Line { from, .. } => Some(*from),
            _ => None,
        });
        assert_eq!(window_start, Some(Point::new(20.0, 40.0)));
    }

    #[test]
    fn segment_wholly_outside_reach_is_dropped() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(clip_segment(Point::new(20.0, 0.0), Point::new(30.0, 5.0), bounds), None);
        assert_eq!(clip_segment(Point::new(f64::INFINITY, 1.0), Point::new(1.0, 1.0), bounds), None);
        assert_eq!(
            clip_segment(Point::new(-5.0, 5.0), Point::new(5.0, 5.0), bounds),
            Some((Point::new(0.0, 5.0), Point::new(5.0, 5.0)))
        );
    }

    #[test]
    fn grid_stays_bounded_for_oversized_view_fields() {
        let mut view = ViewParams::default();
        view.canvas_width_px = u32::MAX;
        view.canvas_height_px = 40;
        let frame = render_plan(&FloorPlanDocument::default(), &view, &RenderTheme::light());
        assert_eq!(frame.width, crate::view::MAX_CANVAS_PX);
        assert_eq!(frame.layer(Layer::Grid).count(), (8192 / 20 + 1) + 3);
    }

    #[test]
    fn frame_carries_theme_font_family() {
        let theme = RenderTheme {
            font_family: "Georgia".into(),
            ..RenderTheme::light()
        };
        assert_eq!(render_placeholder(&ViewParams::default(), &theme).font_family, "Georgia");
    }

    #[test]
    fn tiny_canvas_does_not_emit_negative_card() {
        let view = ViewParams::new(10, 10);
        let frame = render_placeholder(&view, &RenderTheme::light());
        assert_eq!(frame.layer(Layer::Overlay).filter(|op| matches!(op, DrawOp::StrokeRoundedRect { .. })).count(), 0);
    }
}
