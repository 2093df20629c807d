//! Hit testing: canvas pixel → room or hallway lookup.
//!
//! Mirrors paint order front-to-back: rooms paint over hallways, and later
//! rooms paint over earlier ones.

use crate::display::Layer;
use crate::pipeline::rect_px;
use fp_core::{EntityId, FloorPlanDocument, Room};
use kurbo::Point;

/// The area under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// `Layer::Rooms` or `Layer::Hallways`.
    pub layer: Layer,
    /// Index into the corresponding document list.
    pub index: usize,
    pub id: EntityId,
}

/// Find the topmost room or hallway at canvas position (px, py).
/// Returns `None` over background, walls only, or degenerate areas.
pub fn hit_test(doc: &FloorPlanDocument, px: f64, py: f64) -> Option<Hit> {
    let point = Point::new(px, py);
    let plan = &doc.floor_plan;
    topmost(&plan.rooms, Layer::Rooms, point).or_else(|| topmost(&plan.hallways, Layer::Hallways, point))
}

fn topmost(areas: &[Room], layer: Layer, point: Point) -> Option<Hit> {
    areas
        .iter()
        .enumerate()
        .rev()
        .find(|(_, area)| rect_px(&area.bounds).is_some_and(|r| r.contains(point)))
        .map(|(index, area)| Hit {
            layer,
            index,
            id: area.id,
        })
}
