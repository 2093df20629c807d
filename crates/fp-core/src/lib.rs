//! Floor-plan document core.
//!
//! Raw generator JSON goes through [`normalize`] to become a
//! [`FloorPlanDocument`], the immutable snapshot the renderer paints.

pub mod error;
pub mod generator;
pub mod id;
pub mod label;
pub mod model;
pub mod normalize;
pub mod summary;

pub use error::ValidationError;
pub use generator::parse_generator_output;
pub use id::EntityId;
pub use label::{LabelLine, LabelSize, RoomLabel, label_lines};
pub use model::*;
pub use normalize::{Normalized, NormalizeWarning, WarningKind, normalize, normalize_with_warnings};
pub use summary::PlanSummary;
