use thiserror::Error;

/// Unrecoverable problems with a claimed floor-plan document.
///
/// Only structural failures end up here. Anything wrong with an individual
/// entity is absorbed by the normalizer and reported as a
/// [`NormalizeWarning`](crate::normalize::NormalizeWarning) instead.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The top-level value is not an object, or `floorPlan` is missing or not
    /// an object.
    #[error("malformed floor-plan document: {0}")]
    MalformedDocument(String),

    /// The generator answered with its `{ "error": ... }` envelope.
    #[error("floor-plan generator failed: {0}")]
    GeneratorFailed(String),

    /// The generator output is not JSON at all.
    #[error("generator output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ValidationError {
    /// Short, user-facing explanation for the "could not display" state.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MalformedDocument(_) | ValidationError::InvalidJson(_) => {
                "The floor plan data is malformed."
            }
            ValidationError::GeneratorFailed(_) => "The floor plan could not be generated.",
        }
    }
}
