//! Floor-plan document model.
//!
//! A `FloorPlanDocument` is the normalized, render-ready form of whatever the
//! generator produced. It mirrors the wire shape (`{ floorPlan, description }`)
//! so that serializing a normalized document yields JSON the normalizer
//! accepts unchanged. All coordinates and sizes are in grid units.

use crate::id::EntityId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        let (r, g, b, a) = match bytes.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            4 => (short(0)?, short(1)?, short(2)?, short(3)?),
            6 => (long(0)?, long(2)?, long(4)?, 255),
            8 => (long(0)?, long(2)?, long(4)?, long(6)?),
            _ => return None,
        };
        Some(Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ))
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as shortest valid hex string (`#RRGGBB` when opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in grid units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in grid units. Top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle has finite coordinates and a positive area.
    /// Anything else paints as zero-extent.
    pub fn is_drawable(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Nominal plan extent in grid units. Not a clipping bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

// ─── Open enumerations ───────────────────────────────────────────────────

/// Room type. Known values get a dedicated fill color; anything else is
/// carried through verbatim and painted with the default color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomKind {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Office,
    Dining,
    Entry,
    Circulation,
    Other(String),
}

impl RoomKind {
    /// Every known kind, in table order.
    pub const KNOWN: [RoomKind; 8] = [
        RoomKind::Living,
        RoomKind::Bedroom,
        RoomKind::Kitchen,
        RoomKind::Bathroom,
        RoomKind::Office,
        RoomKind::Dining,
        RoomKind::Entry,
        RoomKind::Circulation,
    ];

    /// Classify a type string. Matching ignores ASCII case and surrounding
    /// whitespace; unmatched strings are kept as `Other` unchanged.
    pub fn parse(s: &str) -> Self {
        let key = s.trim();
        Self::KNOWN
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key))
            .unwrap_or_else(|| RoomKind::Other(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoomKind::Living => "living",
            RoomKind::Bedroom => "bedroom",
            RoomKind::Kitchen => "kitchen",
            RoomKind::Bathroom => "bathroom",
            RoomKind::Office => "office",
            RoomKind::Dining => "dining",
            RoomKind::Entry => "entry",
            RoomKind::Circulation => "circulation",
            RoomKind::Other(s) => s,
        }
    }
}

impl From<String> for RoomKind {
    fn from(s: String) -> Self {
        RoomKind::parse(&s)
    }
}

impl From<RoomKind> for String {
    fn from(kind: RoomKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Door swing direction. Only `inward` has a dedicated visual (the swing arc).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DoorSwing {
    #[default]
    Inward,
    Other(String),
}

impl DoorSwing {
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("inward") {
            DoorSwing::Inward
        } else {
            DoorSwing::Other(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DoorSwing::Inward => "inward",
            DoorSwing::Other(s) => s,
        }
    }
}

impl From<String> for DoorSwing {
    fn from(s: String) -> Self {
        DoorSwing::parse(&s)
    }
}

impl From<DoorSwing> for String {
    fn from(swing: DoorSwing) -> Self {
        swing.as_str().to_string()
    }
}

/// Informational door category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DoorKind {
    Entry,
    Interior,
    Other(String),
}

impl DoorKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" => DoorKind::Entry,
            "interior" => DoorKind::Interior,
            _ => DoorKind::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DoorKind::Entry => "entry",
            DoorKind::Interior => "interior",
            DoorKind::Other(s) => s,
        }
    }
}

impl From<String> for DoorKind {
    fn from(s: String) -> Self {
        DoorKind::parse(&s)
    }
}

impl From<DoorKind> for String {
    fn from(kind: DoorKind) -> Self {
        kind.as_str().to_string()
    }
}

// ─── Entities ────────────────────────────────────────────────────────────

/// A room, or (when stored in `hallways`) a circulation space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    /// Display name. May end with a dimension token, see [`crate::label`].
    pub name: String,
    pub bounds: Bounds,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_footage: Option<f64>,
}

/// A straight wall segment. `thickness` is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: EntityId,
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
}

impl Wall {
    /// Zero-length or non-finite walls paint nothing.
    pub fn is_degenerate(&self) -> bool {
        !self.start.is_finite() || !self.end.is_finite() || self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: EntityId,
    pub position: Point,
    /// Back-reference to a wall. Never resolved; dangling values are fine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<EntityId>,
    pub width: f64,
    #[serde(default)]
    pub swing: DoorSwing,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DoorKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: EntityId,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<EntityId>,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

/// An opening (door or window) is drawable when its anchor is finite and it
/// has a positive width.
pub(crate) fn opening_is_drawable(position: Point, width: f64) -> bool {
    position.is_finite() && width.is_finite() && width > 0.0
}

impl Door {
    pub fn is_drawable(&self) -> bool {
        opening_is_drawable(self.position, self.width)
    }
}

impl Window {
    pub fn is_drawable(&self) -> bool {
        opening_is_drawable(self.position, self.width)
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The plan proper: extent plus entity lists, each in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_square_footage: Option<f64>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub windows: Vec<Window>,
    #[serde(default)]
    pub hallways: Vec<Room>,
}

/// Root artifact handed to the renderer as an immutable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanDocument {
    pub floor_plan: FloorPlan,
    #[serde(default)]
    pub description: String,
}

impl FloorPlanDocument {
    /// The layout the generator substitutes when the model's reply cannot be
    /// parsed.
    pub fn parsing_fallback() -> Self {
        Self {
            floor_plan: FloorPlan {
                dimensions: Dimensions {
                    width: 20.0,
                    height: 15.0,
                },
                rooms: vec![Room {
                    id: EntityId::intern("room1"),
                    name: "Generated Room".into(),
                    bounds: Bounds::new(2.0, 2.0, 16.0, 11.0),
                    kind: RoomKind::Living,
                    square_footage: None,
                }],
                ..FloorPlan::default()
            },
            description: "Basic floor plan generated (parsing fallback)".into(),
        }
    }

    pub fn room_count(&self) -> usize {
        self.floor_plan.rooms.len()
    }

    /// True when every entity list is empty.
    pub fn is_blank(&self) -> bool {
        let p = &self.floor_plan;
        p.rooms.is_empty()
            && p.walls.is_empty()
            && p.doors.is_empty()
            && p.windows.is_empty()
            && p.hallways.is_empty()
    }

    /// Serialize back to the wire shape.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
