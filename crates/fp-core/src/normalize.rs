//! Validation and defaulting of raw generator output.
//!
//! Turns an arbitrary decoded JSON value into a render-ready
//! [`FloorPlanDocument`]. Only two things are fatal: a top-level value that is
//! not an object, and a missing or non-object `floorPlan`. Everything else is
//! repaired in place (defaults, synthesized IDs) or dropped with a warning, so
//! one bad entity never blanks the whole plan.

use crate::error::ValidationError;
use crate::id::EntityId;
use crate::model::*;
use serde::Serialize;
use serde_json::{Map, Value};

type Object = Map<String, Value>;

// ─── Warning types ───────────────────────────────────────────────────────

/// Category of a non-fatal normalization finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A list element was not object-shaped and was excluded.
    EntityDropped,
    /// A required list was missing or not an array; an empty list was used.
    ListDefaulted,
    /// A top-level field (dimensions, description) was replaced by a default.
    FieldDefaulted,
}

/// A single non-fatal finding, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeWarning {
    pub kind: WarningKind,
    /// The list or field the finding refers to (e.g. `"rooms"`).
    pub list: &'static str,
    /// Position in the raw list, for entity-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Human-readable message.
    pub message: String,
    /// Short rule identifier (e.g. "non-object-entity").
    pub rule: &'static str,
}

/// A normalized document plus everything that was repaired or dropped.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub document: FloorPlanDocument,
    pub warnings: Vec<NormalizeWarning>,
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Validate and normalize a raw document, discarding warnings.
pub fn normalize(raw: &Value) -> Result<FloorPlanDocument, ValidationError> {
    normalize_with_warnings(raw).map(|n| n.document)
}

/// Validate and normalize a raw document.
///
/// Pure function of its input apart from log output.
pub fn normalize_with_warnings(raw: &Value) -> Result<Normalized, ValidationError> {
    let Some(root) = raw.as_object() else {
        return Err(ValidationError::MalformedDocument(format!(
            "expected an object at the top level, found {}",
            type_name(raw)
        )));
    };

    let plan = match root.get("floorPlan") {
        Some(Value::Object(plan)) => plan,
        Some(other) => {
            return Err(ValidationError::MalformedDocument(format!(
                "`floorPlan` must be an object, found {}",
                type_name(other)
            )));
        }
        // Without a plan, a string `error` is the generator's failure envelope.
        None => {
            return Err(match root.get("error").and_then(Value::as_str) {
                Some(message) => ValidationError::GeneratorFailed(message.to_string()),
                None => ValidationError::MalformedDocument("missing `floorPlan`".to_string()),
            });
        }
    };

    let mut cx = Normalizer::default();

    let dimensions = cx.dimensions(plan.get("dimensions"));
    let total_square_footage =
        opt_number(plan, "totalSquareFootage").or_else(|| opt_number(root, "totalSquareFootage"));

    let floor_plan = FloorPlan {
        dimensions,
        total_square_footage,
        rooms: cx.list(plan, "rooms", "room", true, room),
        walls: cx.list(plan, "walls", "wall", true, wall),
        doors: cx.list(plan, "doors", "door", true, door),
        windows: cx.list(plan, "windows", "window", true, window),
        hallways: cx.list(plan, "hallways", "hallway", false, room),
    };

    let description = cx.description(root.get("description"));

    log::debug!(
        "normalized floor plan: {} rooms, {} hallways, {} walls, {} doors, {} windows ({} warnings)",
        floor_plan.rooms.len(),
        floor_plan.hallways.len(),
        floor_plan.walls.len(),
        floor_plan.doors.len(),
        floor_plan.windows.len(),
        cx.warnings.len()
    );

    Ok(Normalized {
        document: FloorPlanDocument {
            floor_plan,
            description,
        },
        warnings: cx.warnings,
    })
}

// ─── Normalizer state ────────────────────────────────────────────────────

#[derive(Default)]
struct Normalizer {
    warnings: Vec<NormalizeWarning>,
}

impl Normalizer {
    fn warn(
        &mut self,
        kind: WarningKind,
        list: &'static str,
        index: Option<usize>,
        rule: &'static str,
        message: String,
    ) {
        log::warn!("{message}");
        self.warnings.push(NormalizeWarning {
            kind,
            list,
            index,
            message,
            rule,
        });
    }

    fn dimensions(&mut self, raw: Option<&Value>) -> Dimensions {
        let Some(obj) = raw.and_then(Value::as_object) else {
            self.warn(
                WarningKind::FieldDefaulted,
                "dimensions",
                None,
                "missing-dimensions",
                "`dimensions` missing or not an object; using 1 × 1".to_string(),
            );
            return Dimensions::default();
        };

        let mut extent = |key: &'static str| {
            let value = number(obj, key);
            if value >= 1.0 {
                value
            } else {
                self.warn(
                    WarningKind::FieldDefaulted,
                    "dimensions",
                    None,
                    "invalid-dimension",
                    format!("`dimensions.{key}` is {value}; clamped to 1"),
                );
                1.0
            }
        };

        Dimensions {
            width: extent("width"),
            height: extent("height"),
        }
    }

    fn description(&mut self, raw: Option<&Value>) -> String {
        match raw {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.warn(
                    WarningKind::FieldDefaulted,
                    "description",
                    None,
                    "non-string-description",
                    format!(
                        "`description` must be a string, found {}; using \"\"",
                        type_name(other)
                    ),
                );
                String::new()
            }
        }
    }

    /// Normalize one entity list. Non-object elements are dropped; a missing
    /// or mistyped list becomes empty (with a warning when `required`).
    fn list<T>(
        &mut self,
        plan: &Object,
        key: &'static str,
        singular: &'static str,
        required: bool,
        build: fn(&Object, EntityId) -> T,
    ) -> Vec<T> {
        let items = match plan.get(key) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => {
                if required {
                    self.warn(
                        WarningKind::ListDefaulted,
                        key,
                        None,
                        "missing-list",
                        format!("`{key}` is missing; treating as empty"),
                    );
                }
                return Vec::new();
            }
            Some(other) => {
                self.warn(
                    WarningKind::ListDefaulted,
                    key,
                    None,
                    "non-array-list",
                    format!(
                        "`{key}` must be an array, found {}; treating as empty",
                        type_name(other)
                    ),
                );
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(obj) => out.push(build(obj, entity_id(obj, singular, index))),
                None => self.warn(
                    WarningKind::EntityDropped,
                    key,
                    Some(index),
                    "non-object-entity",
                    format!(
                        "dropped {key}[{index}]: expected an object, found {}",
                        type_name(item)
                    ),
                ),
            }
        }
        out
    }
}

// ─── Entity builders ─────────────────────────────────────────────────────

fn room(obj: &Object, id: EntityId) -> Room {
    Room {
        id,
        name: string(obj, "name").unwrap_or_default(),
        bounds: bounds(obj.get("bounds")),
        kind: RoomKind::parse(&string(obj, "type").unwrap_or_default()),
        square_footage: opt_number(obj, "squareFootage"),
    }
}

fn wall(obj: &Object, id: EntityId) -> Wall {
    Wall {
        id,
        start: point(obj.get("start")),
        end: point(obj.get("end")),
        thickness: number(obj, "thickness"),
    }
}

fn door(obj: &Object, id: EntityId) -> Door {
    Door {
        id,
        position: point(obj.get("position")),
        wall_id: reference(obj, "wallId"),
        width: number(obj, "width"),
        swing: string(obj, "swing")
            .map(|s| DoorSwing::parse(&s))
            .unwrap_or_default(),
        kind: string(obj, "type").map(|s| DoorKind::parse(&s)),
    }
}

fn window(obj: &Object, id: EntityId) -> Window {
    Window {
        id,
        position: point(obj.get("position")),
        wall_id: reference(obj, "wallId"),
        width: number(obj, "width"),
        dimensions: string(obj, "dimensions"),
    }
}

// ─── Field helpers ───────────────────────────────────────────────────────

/// A finite number, from a JSON number or a numeric string.
fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Missing or unusable numeric fields default to 0.
fn number(obj: &Object, key: &str) -> f64 {
    opt_number(obj, key).unwrap_or(0.0)
}

fn opt_number(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key).and_then(as_number)
}

/// Strings pass through; numbers and booleans are stringified.
fn string(obj: &Object, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn reference(obj: &Object, key: &str) -> Option<EntityId> {
    string(obj, key)
        .filter(|s| !s.trim().is_empty())
        .map(|s| EntityId::intern(&s))
}

fn entity_id(obj: &Object, singular: &str, index: usize) -> EntityId {
    reference(obj, "id").unwrap_or_else(|| EntityId::synthesized(singular, index))
}

fn point(raw: Option<&Value>) -> Point {
    match raw.and_then(Value::as_object) {
        Some(obj) => Point::new(number(obj, "x"), number(obj, "y")),
        None => Point::default(),
    }
}

fn bounds(raw: Option<&Value>) -> Bounds {
    match raw.and_then(Value::as_object) {
        Some(obj) => Bounds::new(
            number(obj, "x"),
            number(obj, "y"),
            number(obj, "width"),
            number(obj, "height"),
        ),
        None => Bounds::default(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
