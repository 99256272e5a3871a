//! URL resolution against the sidebar.
//!
//! Only the second and third path segments are read: `/doc/{section}/{file}`.
//! Matching is exact string equality on slugs, earliest declaration wins.

use crate::location::Location;
use crate::sidebar::Sidebar;

/// Path segment holding the section slug.
const SECTION_SEGMENT: usize = 2;
/// Path segment holding the file slug.
const FILE_SEGMENT: usize = 3;

/// Outcome of resolving a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Section and file both matched. The file's headings are parsed.
    File {
        /// Section index.
        section: usize,
        /// Matched filename.
        file: String,
    },
    /// Section matched, no file segment. The section's default file is
    /// loaded without heading parse.
    Section {
        /// Section index.
        section: usize,
    },
    /// No section segment at all. Falls back to the first section.
    Default,
    /// A segment is present but does not match.
    NotFound {
        /// The segment that failed to resolve.
        segment: String,
    },
}

/// Resolve a location against the sidebar.
pub fn resolve(sidebar: &Sidebar, location: &Location) -> Resolution {
    let Some(section_slug) = location.segment(SECTION_SEGMENT) else {
        return Resolution::Default;
    };
    let Some(section) = sidebar.find_section(section_slug) else {
        return Resolution::NotFound {
            segment: section_slug.to_owned(),
        };
    };

    match location.segment(FILE_SEGMENT) {
        None => Resolution::Section { section },
        Some(file_slug) => match sidebar.find_file(section, file_slug) {
            Some(file) => Resolution::File {
                section,
                file: file.to_owned(),
            },
            None => Resolution::NotFound {
                segment: file_slug.to_owned(),
            },
        },
    }
}
