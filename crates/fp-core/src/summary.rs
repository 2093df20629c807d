//! Summary badges shown next to the canvas.

use crate::label::format_quantity;
use crate::model::FloorPlanDocument;
use serde::Serialize;

/// Descriptions longer than this many characters are truncated.
pub const DESCRIPTION_BADGE_LIMIT: usize = 50;

/// Presentational metadata about a plan. Not geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub room_count: usize,
    pub total_square_footage: Option<f64>,
    /// Already truncated for display; `None` when the description is empty.
    pub description: Option<String>,
}

impl PlanSummary {
    pub fn of(doc: &FloorPlanDocument) -> Self {
        let description = (!doc.description.is_empty())
            .then(|| truncate_description(&doc.description, DESCRIPTION_BADGE_LIMIT));
        Self {
            room_count: doc.room_count(),
            total_square_footage: doc
                .floor_plan
                .total_square_footage
                .filter(|v| v.is_finite()),
            description,
        }
    }

    /// Badge texts, top to bottom.
    pub fn badges(&self) -> Vec<String> {
        let mut badges = vec![format!("{} rooms", self.room_count)];
        if let Some(sqft) = self.total_square_footage {
            badges.push(format!("{} sq ft", format_quantity(sqft)));
        }
        if let Some(description) = &self.description {
            badges.push(description.clone());
        }
        badges
    }
}

/// Cut `text` to `limit` characters, appending `...` when anything was cut.
pub fn truncate_description(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
