//! Sidebar index.
//!
//! The sidebar is the single source of truth for navigation: URL
//! resolution, link generation and the rendered menu all read it. Order is
//! significant, the first section is the default landing section.

use std::collections::BTreeMap;

use crate::slug::{file_stem, slugify, start_case};

/// Path prefix shared by all documentation links.
pub const DOC_ROOT: &str = "/doc";

/// A sidebar section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SidebarSection {
    /// Display name.
    pub name: String,
    /// Explicit URL slug. Derived from `name` when absent.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub slug: Option<String>,
    /// Folder the section's files are fetched from (e.g. `/static/docs/get-started`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub folder: String,
    /// Ordered filenames.
    #[cfg_attr(feature = "serde", serde(default))]
    pub files: Vec<String>,
    /// File shown when the section itself is selected.
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "index_file", skip_serializing_if = "Option::is_none")
    )]
    pub index_file: Option<String>,
    /// Display label overrides keyed by filename.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub labels: BTreeMap<String, String>,
}

impl SidebarSection {
    /// URL slug for this section.
    pub fn url_slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }

    /// URL slug for a file in this section.
    pub fn file_slug(file: &str) -> String {
        slugify(file_stem(file))
    }

    /// Display label for a file.
    pub fn label(&self, file: &str) -> String {
        self.labels
            .get(file)
            .cloned()
            .unwrap_or_else(|| start_case(file_stem(file)))
    }

    /// File loaded when the section is selected: the index file, or the
    /// first file when no index file is designated.
    pub fn default_file(&self) -> Option<&str> {
        self.index_file
            .as_deref()
            .or_else(|| self.files.first().map(String::as_str))
    }

    /// Whether `file` can become the current file of this section.
    pub fn contains(&self, file: &str) -> bool {
        self.files.iter().any(|f| f == file) || self.index_file.as_deref() == Some(file)
    }
}

/// Error returned when a sidebar cannot be built.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SidebarError {
    /// No sections configured.
    #[error("sidebar must contain at least one section")]
    Empty,
    /// A section has nothing to show.
    #[error("section '{0}' has neither files nor an index file")]
    NoFiles(String),
    /// A section or file slug cannot appear as a URL segment.
    #[error("section '{section}': '{entry}' has no usable URL slug (got '{slug}')")]
    BadSlug {
        section: String,
        /// Section name or filename the slug came from.
        entry: String,
        slug: String,
    },
}

/// Whether `slug` survives a trip through `/doc/{section}/{file}`.
fn is_segment(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '#', '?'])
}

/// Two sidebar entries that produce the same URL slug.
///
/// Resolution picks the earliest declaration, so the later entry is
/// unreachable by URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlugCollision {
    /// The shared slug.
    pub slug: String,
    /// Section index, or `None` for a section-level collision.
    pub section: Option<usize>,
    /// Index of the entry that wins.
    pub first: usize,
    /// Index of the shadowed entry.
    pub second: usize,
}

/// Ordered, non-empty list of sidebar sections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sidebar {
    sections: Vec<SidebarSection>,
}

impl Sidebar {
    /// Build a sidebar from configured sections.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] if the list is empty, a section has no
    /// file to show, or a section or listed file has a slug that cannot be
    /// a URL segment. The index file is exempt, it is never linked by slug.
    pub fn new(sections: Vec<SidebarSection>) -> Result<Self, SidebarError> {
        if sections.is_empty() {
            return Err(SidebarError::Empty);
        }
        for section in &sections {
            if section.default_file().is_none() {
                return Err(SidebarError::NoFiles(section.name.clone()));
            }
            let slugs = std::iter::once((section.name.as_str(), section.url_slug())).chain(
                section
                    .files
                    .iter()
                    .map(|f| (f.as_str(), SidebarSection::file_slug(f))),
            );
            for (entry, slug) in slugs {
                if !is_segment(&slug) {
                    return Err(SidebarError::BadSlug {
                        section: section.name.clone(),
                        entry: entry.to_owned(),
                        slug,
                    });
                }
            }
        }
        Ok(Self { sections })
    }

    /// All sections in declaration order.
    pub fn sections(&self) -> &[SidebarSection] {
        &self.sections
    }

    /// Number of sections (never zero).
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections. Never true for a constructed sidebar.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section at `index`.
    pub fn section(&self, index: usize) -> Option<&SidebarSection> {
        self.sections.get(index)
    }

    /// Index of the first section whose slug equals `slug`.
    pub fn find_section(&self, slug: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.url_slug() == slug)
    }

    /// First file in `section` whose slug equals `slug`.
    ///
    /// Only the section's `files` are addressable; the index file is
    /// reached through the section URL.
    pub fn find_file(&self, section: usize, slug: &str) -> Option<&str> {
        self.section(section)?
            .files
            .iter()
            .find(|f| SidebarSection::file_slug(f) == slug)
            .map(String::as_str)
    }

    /// Link to a section, optionally to one of its files.
    ///
    /// Produces `/doc/{section}` or `/doc/{section}/{file}`.
    pub fn link_href(&self, section: usize, file: Option<&str>) -> Option<String> {
        let section_slug = self.section(section)?.url_slug();
        Some(match file {
            Some(file) => format!(
                "{DOC_ROOT}/{section_slug}/{}",
                SidebarSection::file_slug(file)
            ),
            None => format!("{DOC_ROOT}/{section_slug}"),
        })
    }

    /// Link used by the section entry in the menu.
    ///
    /// Sections with an index file link to the bare section URL; others
    /// link straight to their first file.
    pub fn section_href(&self, section: usize) -> Option<String> {
        let s = self.section(section)?;
        if s.index_file.is_some() {
            self.link_href(section, None)
        } else {
            self.link_href(section, s.files.first().map(String::as_str))
        }
    }

    /// Entries whose slugs collide with an earlier declaration.
    pub fn collisions(&self) -> Vec<SlugCollision> {
        let section_slugs: Vec<String> = self.sections.iter().map(SidebarSection::url_slug).collect();
        let mut found = duplicates(&section_slugs, None);

        for (index, section) in self.sections.iter().enumerate() {
            let file_slugs: Vec<String> = section
                .files
                .iter()
                .map(|f| SidebarSection::file_slug(f))
                .collect();
            found.extend(duplicates(&file_slugs, Some(index)));
        }
        found
    }
}

fn duplicates(slugs: &[String], section: Option<usize>) -> Vec<SlugCollision> {
    let mut found = Vec::new();
    for (second, slug) in slugs.iter().enumerate() {
        if let Some(first) = slugs[..second].iter().position(|s| s == slug) {
            found.push(SlugCollision {
                slug: slug.clone(),
                section,
                first,
                second,
            });
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(name: &str, slug: Option<&str>, files: &[&str]) -> SidebarSection {
        SidebarSection {
            name: name.to_owned(),
            slug: slug.map(str::to_owned),
            folder: format!("/static/docs/{}", slugify(name)),
            files: files.iter().map(|f| (*f).to_owned()).collect(),
            ..Default::default()
        }
    }

    fn sidebar() -> Sidebar {
        Sidebar::new(vec![
            section("Start", None, &["intro.md"]),
            section(
                "Command Reference",
                Some("command-reference"),
                &["add.md", "remove.md"],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_sidebar_rejected() {
        assert_eq!(Sidebar::new(vec![]), Err(SidebarError::Empty));
    }

    #[test]
    fn test_section_without_files_rejected() {
        let err = Sidebar::new(vec![section("Empty", None, &[])]).unwrap_err();
        assert_eq!(err, SidebarError::NoFiles("Empty".to_owned()));
    }

    #[test]
    fn test_section_with_only_index_file_accepted() {
        let mut s = section("Overview", None, &[]);
        s.index_file = Some("index.md".to_owned());
        assert!(Sidebar::new(vec![s]).is_ok());
    }

    #[test]
    fn test_section_name_without_slug_rejected() {
        let err = Sidebar::new(vec![
            section("Start", None, &["intro.md"]),
            section("???", None, &["a.md"]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            SidebarError::BadSlug {
                section: "???".to_owned(),
                entry: "???".to_owned(),
                slug: String::new(),
            }
        );
    }

    #[test]
    fn test_file_without_slug_rejected() {
        let err = Sidebar::new(vec![section("Commands", None, &["a.md", "__.md"])]).unwrap_err();

        assert_eq!(
            err,
            SidebarError::BadSlug {
                section: "Commands".to_owned(),
                entry: "__.md".to_owned(),
                slug: String::new(),
            }
        );
    }

    #[test]
    fn test_explicit_slug_with_separator_rejected() {
        for slug in ["commands/add", "a#b", "x?y", ""] {
            let err =
                Sidebar::new(vec![section("Commands", Some(slug), &["add.md"])]).unwrap_err();
            assert!(matches!(err, SidebarError::BadSlug { .. }), "slug {slug:?}: {err:?}");
        }
    }

    #[test]
    fn test_index_file_slug_not_checked() {
        let mut s = section("Commands", None, &["add.md"]);
        s.index_file = Some("_.md".to_owned());
        assert!(Sidebar::new(vec![s]).is_ok());
    }

    #[test]
    fn test_url_slug_derived_from_name() {
        assert_eq!(section("Get Started", None, &["a.md"]).url_slug(), "get-started");
    }

    #[test]
    fn test_url_slug_explicit() {
        assert_eq!(
            section("Commands", Some("commands-reference"), &["a.md"]).url_slug(),
            "commands-reference"
        );
    }

    #[test]
    fn test_label_default_and_override() {
        let mut s = section("Commands", None, &["remote-add.md", "dvc.md"]);
        s.labels.insert("dvc.md".to_owned(), "DVC".to_owned());
        assert_eq!(s.label("remote-add.md"), "Remote Add");
        assert_eq!(s.label("dvc.md"), "DVC");
    }

    #[test]
    fn test_default_file_prefers_index() {
        let mut s = section("Commands", None, &["add.md"]);
        assert_eq!(s.default_file(), Some("add.md"));
        s.index_file = Some("index.md".to_owned());
        assert_eq!(s.default_file(), Some("index.md"));
        assert!(s.contains("index.md"));
        assert!(s.contains("add.md"));
        assert!(!s.contains("remove.md"));
    }

    #[test]
    fn test_link_href_file() {
        assert_eq!(
            sidebar().link_href(1, Some("remove.md")).unwrap(),
            "/doc/command-reference/remove"
        );
    }

    #[test]
    fn test_link_href_section_only() {
        assert_eq!(sidebar().link_href(0, None).unwrap(), "/doc/start");
    }

    #[test]
    fn test_link_href_out_of_range() {
        assert!(sidebar().link_href(5, None).is_none());
    }

    #[test]
    fn test_section_href_without_index_links_first_file() {
        assert_eq!(sidebar().section_href(1).unwrap(), "/doc/command-reference/add");
    }

    #[test]
    fn test_section_href_with_index_links_section() {
        let mut s = section("Commands", None, &["add.md"]);
        s.index_file = Some("index.md".to_owned());
        let sidebar = Sidebar::new(vec![s]).unwrap();
        assert_eq!(sidebar.section_href(0).unwrap(), "/doc/commands");
    }

    #[test]
    fn test_find_section_and_file() {
        let sidebar = sidebar();
        assert_eq!(sidebar.find_section("command-reference"), Some(1));
        assert_eq!(sidebar.find_section("nope"), None);
        assert_eq!(sidebar.find_file(1, "remove"), Some("remove.md"));
        assert_eq!(sidebar.find_file(1, "intro"), None);
        assert_eq!(sidebar.find_file(9, "remove"), None);
    }

    #[test]
    fn test_collisions_reported_first_wins() {
        let sidebar = Sidebar::new(vec![
            section("Guide", None, &["get-started.md", "Get Started.md"]),
            section("guide", None, &["a.md"]),
        ])
        .unwrap();

        let collisions = sidebar.collisions();
        assert_eq!(
            collisions,
            vec![
                SlugCollision {
                    slug: "guide".to_owned(),
                    section: None,
                    first: 0,
                    second: 1,
                },
                SlugCollision {
                    slug: "get-started".to_owned(),
                    section: Some(0),
                    first: 0,
                    second: 1,
                },
            ]
        );
        assert_eq!(sidebar.find_section("guide"), Some(0));
        assert_eq!(sidebar.find_file(0, "get-started"), Some("get-started.md"));
    }

    #[test]
    fn test_no_collisions() {
        assert!(sidebar().collisions().is_empty());
    }
}
