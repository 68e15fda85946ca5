//! README header parsing.

use super::rules::{HeaderField, HEADER_RULES};
use serde::Serialize;

/// Metadata found at the top of a README.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadmeHeader {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
}

impl ReadmeHeader {
    /// Returns true when all three fields were found.
    pub fn is_complete(&self) -> bool {
        self.title.is_some() && self.short_description.is_some() && self.description.is_some()
    }

    /// Names of the fields that were not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.short_description.is_none() {
            missing.push("short_description");
        }
        if self.description.is_none() {
            missing.push("description");
        }
        missing
    }

    fn field(&self, field: HeaderField) -> &Option<String> {
        match field {
            HeaderField::ShortDescription => &self.short_description,
            HeaderField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: HeaderField) -> &mut Option<String> {
        match field {
            HeaderField::ShortDescription => &mut self.short_description,
            HeaderField::Description => &mut self.description,
        }
    }

    fn has_markers(&self) -> bool {
        self.short_description.is_some() && self.description.is_some()
    }
}

/// Parses the header from the first `window` lines of `text`.
///
/// The title is the first non-blank line with leading `#` markers removed.
/// The descriptions come from the first line matching each rule in
/// [`HEADER_RULES`]. Returns `None` when no field is found.
pub fn parse_header(text: &str, window: usize) -> Option<ReadmeHeader> {
    let lines: Vec<&str> = text.lines().take(window).collect();

    let mut header = ReadmeHeader {
        title: lines
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
            .map(strip_heading)
            .filter(|title| !title.is_empty()),
        ..Default::default()
    };

    for line in &lines {
        if header.has_markers() {
            break;
        }

        for rule in HEADER_RULES.iter() {
            if header.field(rule.field).is_some() {
                continue;
            }
            if let Some(value) = rule.apply(line) {
                *header.field_mut(rule.field) = Some(value);
                break;
            }
        }
    }

    if header == ReadmeHeader::default() {
        None
    } else {
        Some(header)
    }
}

fn strip_heading(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}
