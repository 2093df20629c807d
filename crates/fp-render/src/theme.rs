//! Fixed colors, stroke widths and font sizes of the render pipeline.
//!
//! `RenderTheme::light()` is the canonical palette. Hosts may override any
//! subset of fields from JSON; omitted fields keep their light-theme value.

use fp_core::{Color, RoomKind};
use serde::{Deserialize, Serialize};

/// CSS font stack used for every label unless the theme overrides it.
pub const DEFAULT_FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

/// Fill color per room type. Every known type has its own entry; anything
/// else gets `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomPalette {
    pub living: Color,
    pub bedroom: Color,
    pub kitchen: Color,
    pub bathroom: Color,
    pub office: Color,
    pub dining: Color,
    pub entry: Color,
    pub circulation: Color,
    pub default: Color,
}

impl Default for RoomPalette {
    fn default() -> Self {
        Self {
            living: Color::rgb8(0xFE, 0xF3, 0xC7),
            bedroom: Color::rgb8(0xDB, 0xEA, 0xFE),
            kitchen: Color::rgb8(0xFE, 0xD7, 0xD7),
            bathroom: Color::rgb8(0xE0, 0xF2, 0xFE),
            office: Color::rgb8(0xF3, 0xE8, 0xFF),
            dining: Color::rgb8(0xFD, 0xE6, 0x8A),
            entry: Color::rgb8(0xDC, 0xFC, 0xE7),
            circulation: Color::rgb8(0xF1, 0xF5, 0xF9),
            default: Color::rgb8(0xF8, 0xFA, 0xFC),
        }
    }
}

impl RoomPalette {
    /// Pure function of the room type.
    pub fn fill_for(&self, kind: &RoomKind) -> Color {
        match kind {
            RoomKind::Living => self.living,
            RoomKind::Bedroom => self.bedroom,
            RoomKind::Kitchen => self.kitchen,
            RoomKind::Bathroom => self.bathroom,
            RoomKind::Office => self.office,
            RoomKind::Dining => self.dining,
            RoomKind::Entry => self.entry,
            RoomKind::Circulation => self.circulation,
            RoomKind::Other(_) => self.default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTheme {
    /// Clear color. Transparent lets the host page show through.
    pub background: Color,
    pub grid: Color,
    pub grid_width: f64,

    pub rooms: RoomPalette,
    pub room_border: Color,
    pub room_border_width: f64,
    pub entry_border: Color,
    pub entry_border_width: f64,

    pub hallway_fill: Color,
    pub hallway_border: Color,
    pub hallway_border_width: f64,

    pub label: Color,
    pub label_size: f64,
    pub secondary_label_size: f64,
    pub font_family: String,

    pub wall: Color,
    pub wall_width: f64,
    pub door: Color,
    pub door_width: f64,
    pub window: Color,
    pub window_width: f64,

    pub placeholder_border: Color,
    pub placeholder_text: Color,
    pub error_text: Color,
}

impl Default for RenderTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl RenderTheme {
    pub fn light() -> Self {
        Self {
            background: Color::TRANSPARENT,
            grid: Color::rgb8(0xE5, 0xE7, 0xEB),
            grid_width: 1.0,

            rooms: RoomPalette::default(),
            room_border: Color::rgb8(0x64, 0x74, 0x8B),
            room_border_width: 2.0,
            entry_border: Color::rgb8(0xD9, 0x77, 0x06),
            entry_border_width: 4.0,

            hallway_fill: Color::rgb8(0xF1, 0xF5, 0xF9),
            hallway_border: Color::rgb8(0x94, 0xA3, 0xB8),
            hallway_border_width: 1.0,

            label: Color::rgb8(0x1E, 0x29, 0x3B),
            label_size: 14.0,
            secondary_label_size: 11.0,
            font_family: DEFAULT_FONT_FAMILY.into(),

            wall: Color::rgb8(0x37, 0x41, 0x51),
            wall_width: 8.0,
            door: Color::rgb8(0x05, 0x96, 0x69),
            door_width: 4.0,
            window: Color::rgb8(0x0E, 0xA5, 0xE9),
            window_width: 6.0,

            placeholder_border: Color::rgb8(0x94, 0xA3, 0xB8),
            placeholder_text: Color::rgb8(0x64, 0x74, 0x8B),
            error_text: Color::rgb8(0xDC, 0x26, 0x26),
        }
    }

    /// Dark canvas chrome. Room fills stay light so labels remain readable.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(0x1C, 0x1C, 0x1E),
            grid: Color::rgba(1.0, 1.0, 1.0, 0.08),
            placeholder_border: Color::rgb8(0x63, 0x63, 0x66),
            placeholder_text: Color::rgb8(0x98, 0x98, 0x9D),
            error_text: Color::rgb8(0xF8, 0x71, 0x71),
            ..Self::light()
        }
    }

    /// Parse a (partial) theme override. Missing fields keep light values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Stroke for a room border; entries get the accent treatment.
    pub fn room_border_for(&self, kind: &RoomKind) -> (Color, f64) {
        match kind {
            RoomKind::Entry => (self.entry_border, self.entry_border_width),
            _ => (self.room_border, self.room_border_width),
        }
    }
}
