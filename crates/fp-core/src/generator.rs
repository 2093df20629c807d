//! Parsing of raw generator replies.
//!
//! The generator is a language model behind an HTTP function. Its reply is
//! text that should be a JSON document, but is sometimes wrapped in a Markdown
//! code fence, and on failure is an `{ "error": ... }` envelope.

use crate::error::ValidationError;
use crate::normalize::{Normalized, normalize_with_warnings};

/// Parse and normalize the generator's raw text reply.
pub fn parse_generator_output(text: &str) -> Result<Normalized, ValidationError> {
    let body = strip_code_fence(text);
    let raw: serde_json::Value = serde_json::from_str(body)?;
    normalize_with_warnings(&raw)
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    let rest = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
