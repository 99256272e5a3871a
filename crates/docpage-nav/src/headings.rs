//! Table of contents extraction.
//!
//! Only second-level ATX headings that follow a newline are collected, so a
//! heading on the very first line of a document is not part of its table
//! of contents.

use std::sync::LazyLock;

use regex::Regex;

use crate::slug::slugify;

static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n## \s*(.*)").unwrap());

/// A table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    /// Heading text as written.
    pub label: String,
    /// Anchor slug derived from the label.
    pub slug: String,
}

impl Heading {
    /// Create a heading, deriving its slug from the label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let slug = slugify(&label);
        Self { label, slug }
    }
}

/// Extract second-level headings in order of appearance.
///
/// Repeated labels yield repeated slugs.
pub fn extract_headings(text: &str) -> Vec<Heading> {
    H2_RE
        .captures_iter(text)
        .map(|caps| Heading::new(caps[1].trim_end_matches('\r')))
        .collect()
}
