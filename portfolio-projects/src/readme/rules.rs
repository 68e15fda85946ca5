//! Accepted README header syntaxes.
//!
//! Each rule recognises one field on one line. Supporting a new syntax means
//! adding a row to [`RULE_TABLE`]; the scanning loop in
//! [`parse_header`](super::parse_header) does not change.

use once_cell::sync::Lazy;
use regex::Regex;

/// Header fields filled from marker lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    ShortDescription,
    Description,
}

/// One `{field, matcher, post-processing}` entry.
pub struct HeaderRule {
    pub field: HeaderField,
    matcher: Regex,
    post: fn(&str) -> Option<String>,
}

impl HeaderRule {
    fn new(field: HeaderField, labels: &str, post: fn(&str) -> Option<String>) -> Self {
        Self {
            field,
            matcher: marker_pattern(labels),
            post,
        }
    }

    /// Returns the cleaned value if `line` is a marker for this rule's field.
    pub fn apply(&self, line: &str) -> Option<String> {
        let captures = self.matcher.captures(line)?;
        (self.post)(captures.name("value")?.as_str())
    }
}

/// Field labels, tried in order.
const RULE_TABLE: &[(HeaderField, &str)] = &[
    (HeaderField::ShortDescription, "short_description|short-description"),
    (
        HeaderField::Description,
        "full_description|full-description|description",
    ),
];

/// The rule set used by the header parser.
pub static HEADER_RULES: Lazy<Vec<HeaderRule>> = Lazy::new(|| {
    RULE_TABLE
        .iter()
        .map(|(field, labels)| HeaderRule::new(*field, labels, clean_value))
        .collect()
});

/// Builds a case-insensitive matcher for `label: value`.
///
/// Accepts an optional blockquote marker, bold markup around the label (with
/// the colon inside or outside it), quotes around the label or the whole
/// line, and an optional trailing `;`.
fn marker_pattern(labels: &str) -> Regex {
    let pattern = format!(
        r#"(?i)^\s*(?:>\s*)?(?:\*\*|__)?['"]?(?:{labels})(?:\*\*|__)?['"]?\s*:\s*(?:\*\*|__)?\s*(?P<value>.+?)\s*;?\s*$"#
    );
    Regex::new(&pattern).expect("header pattern is valid")
}

/// Trims the value, then drops one pair of surrounding quotes.
fn clean_value(raw: &str) -> Option<String> {
    let value = raw.trim().trim_end_matches(';').trim();
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    let value = value.strip_suffix(['"', '\'']).unwrap_or(value).trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
