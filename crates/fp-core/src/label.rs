//! Room label rules.
//!
//! Generated room names often carry their size as a suffix, e.g.
//! `"Bedroom 1 (12' x 10')"` or `"Kitchen 12x14"`. The renderer shows that
//! suffix on its own, smaller line. The rule here decides what counts as a
//! dimension suffix so that names like `"Bedroom 1"` stay on one line.

use smallvec::SmallVec;

/// Font size class of a label line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSize {
    Primary,
    Secondary,
}

/// One line of a room label, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLine {
    pub text: String,
    pub size: LabelSize,
}

/// A room name split into its display name and optional dimension suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLabel {
    pub primary: String,
    pub dimension: Option<String>,
}

impl RoomLabel {
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match split_dimension_suffix(trimmed) {
            Some((primary, dimension)) => Self {
                primary: primary.to_string(),
                dimension: Some(dimension.to_string()),
            },
            None => Self {
                primary: trimmed.to_string(),
                dimension: None,
            },
        }
    }
}

/// Lay out the label lines for a room: name, optional dimension suffix and
/// optional square footage.
pub fn label_lines(name: &str, square_footage: Option<f64>) -> SmallVec<[LabelLine; 3]> {
    let label = RoomLabel::parse(name);
    let mut lines = SmallVec::new();
    if !label.primary.is_empty() {
        lines.push(LabelLine {
            text: label.primary,
            size: LabelSize::Primary,
        });
    }
    if let Some(dimension) = label.dimension {
        lines.push(LabelLine {
            text: dimension,
            size: LabelSize::Secondary,
        });
    }
    if let Some(sqft) = square_footage.filter(|v| v.is_finite()) {
        lines.push(LabelLine {
            text: format!("{} sq ft", format_quantity(sqft)),
            size: LabelSize::Secondary,
        });
    }
    lines
}

/// Whole numbers print without a fraction; everything else with one decimal.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Split `name` into `(primary, dimension)` when it ends with a dimension
/// token. The token is a trailing parenthesised group if there is one, else
/// the last whitespace-separated segment. `primary` is never empty.
fn split_dimension_suffix(name: &str) -> Option<(&str, &str)> {
    let start = trailing_group_start(name)
        .or_else(|| name.rfind(char::is_whitespace).map(|i| i + 1))?;
    let (head, token) = name.split_at(start);
    let primary = head.trim_end();
    if primary.is_empty() || !looks_like_dimension(token) {
        return None;
    }
    Some((primary, token))
}

/// Byte offset of the `(` that opens a group closing at the end of `name`.
fn trailing_group_start(name: &str) -> Option<usize> {
    if !name.ends_with(')') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in name.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

const UNIT_MARKERS: [char; 6] = ['\'', '"', '′', '″', '×', '²'];
const UNIT_SUFFIXES: [&str; 7] = ["sqft", "ft", "cm", "mm", "in", "m", "sf"];

fn looks_like_dimension(token: &str) -> bool {
    if !token.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let bracketed = (token.starts_with('(') && token.ends_with(')'))
        || (token.starts_with('[') && token.ends_with(']'));
    bracketed
        || token.contains(UNIT_MARKERS)
        || is_by_pattern(token)
        || has_unit_suffix(token)
}

/// `12x10`, `12.5X9` and friends.
fn is_by_pattern(token: &str) -> bool {
    token
        .split_once(['x', 'X'])
        .is_some_and(|(a, b)| is_decimal(a) && is_decimal(b))
}

fn has_unit_suffix(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    UNIT_SUFFIXES.iter().any(|unit| {
        lower
            .strip_suffix(unit)
            .is_some_and(|n| is_decimal(n.trim_end_matches('.')))
    })
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(lines: &[LabelLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn splits_parenthesised_dimension() {
        let label = RoomLabel::parse("Bedroom 1 (12' x 10')");
        assert_eq!(label.primary, "Bedroom 1");
        assert_eq!(label.dimension.as_deref(), Some("(12' x 10')"));
    }

    #[test]
    fn single_word_stays_single_line() {
        let lines = label_lines("Kitchen", None);
        assert_eq!(texts(&lines), vec!["Kitchen"]);
        assert_eq!(lines[0].size, LabelSize::Primary);
    }

    #[test]
    fn trailing_number_is_not_a_dimension() {
        assert_eq!(RoomLabel::parse("Bedroom 1").dimension, None);
        assert_eq!(RoomLabel::parse("Suite (guest)").dimension, None);
    }

    #[test]
    fn recognizes_bare_dimension_tokens() {
        for (name, dim) in [
            ("Living 20x15", "20x15"),
            ("Patio 12'x8'", "12'x8'"),
            ("Studio 30m²", "30m²"),
            ("Loft 400sqft", "400sqft"),
            ("Hall 3.5m", "3.5m"),
        ] {
            assert_eq!(
                RoomLabel::parse(name).dimension.as_deref(),
                Some(dim),
                "name: {name}"
            );
        }
    }

    #[test]
    fn dimension_only_name_is_not_split() {
        let label = RoomLabel::parse("(12' x 10')");
        assert_eq!(label.primary, "(12' x 10')");
        assert_eq!(label.dimension, None);
    }

    #[test]
    fn square_footage_adds_third_line() {
        let lines = label_lines("Bedroom 1 (12' x 10')", Some(120.0));
        assert_eq!(
            texts(&lines),
            vec!["Bedroom 1", "(12' x 10')", "120 sq ft"]
        );
        assert_eq!(lines[1].size, LabelSize::Secondary);
        assert_eq!(lines[2].size, LabelSize::Secondary);
    }

    #[test]
    fn empty_name_yields_no_primary_line() {
        assert!(label_lines("", None).is_empty());
        assert_eq!(texts(&label_lines("  ", Some(80.5))), vec!["80.5 sq ft"]);
    }

    #[test]
    fn unbalanced_parens_fall_back_to_last_token() {
        let label = RoomLabel::parse("Den 10x12)");
        assert_eq!(label.primary, "Den 10x12)");
        assert_eq!(label.dimension, None);
    }
}
