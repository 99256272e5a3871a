//! Page view model.
//!
//! [`PageView`] is everything a renderer needs to draw the page: the title,
//! the sidebar tree with active flags and table of contents, and the main
//! content. It serializes to JSON for the page API.

use docpage_nav::{Location, NavigationState, PageStatus, Sidebar, SidebarSection};
use docpage_source::document_path;
use serde::Serialize;

/// Site-wide presentation settings.
#[derive(Clone, Debug, Default)]
pub struct SiteInfo {
    /// Title suffix shared by every page.
    pub title: String,
    /// Prefix of "edit this page" links.
    pub edit_url_base: Option<String>,
}

/// Rendered state of a documentation page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageView {
    /// Document title, `"{section} | {site}"`.
    pub title: String,
    /// Sidebar tree.
    pub sections: Vec<SectionView>,
    /// Main content.
    pub content: ContentView,
    /// Whether the mobile menu is open.
    pub menu_open: bool,
}

/// Sidebar section entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SectionView {
    /// Display name from the sidebar.
    pub name: String,
    /// Section link: bare section URL with an index file, else the first file.
    pub href: String,
    /// Whether this is the current section; only it shows its files.
    pub active: bool,
    /// Files in declaration order.
    pub files: Vec<FileView>,
}

/// Sidebar file entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileView {
    /// Configured label or the start-cased filename.
    pub label: String,
    /// `/doc/{section}/{file}` link.
    pub href: String,
    /// Whether this is the current file.
    pub active: bool,
    /// Table of contents; only filled for the active file.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<HeadingView>,
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadingView {
    /// Heading text as written after `## `.
    pub label: String,
    /// Anchor id of the rendered heading.
    pub slug: String,
    /// In-page link, `#{slug}`.
    pub href: String,
}

/// Main content of the page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentView {
    /// No document has arrived yet.
    Loading,
    /// Markdown document.
    Markdown {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        edit_link: Option<String>,
    },
    /// The URL does not name a sidebar entry.
    NotFound,
    /// The document could not be fetched.
    LoadFailed {
        message: String,
        retry_href: String,
    },
}

impl PageView {
    /// Build the view of `state`.
    ///
    /// `location` is the current URL; it becomes the retry link of a failed
    /// load.
    pub fn build(
        state: &NavigationState,
        sidebar: &Sidebar,
        site: &SiteInfo,
        location: &Location,
    ) -> Self {
        let current = sidebar.section(state.current_section);
        let title = match current {
            Some(section) => format!("{} | {}", section.name, site.title),
            None => site.title.clone(),
        };

        let content = match &state.status {
            PageStatus::Idle | PageStatus::Loading => ContentView::Loading,
            PageStatus::NotFound => ContentView::NotFound,
            PageStatus::LoadFailed(message) => ContentView::LoadFailed {
                message: message.clone(),
                retry_href: location.href(),
            },
            PageStatus::Ready => ContentView::Markdown {
                text: state.document_text.clone(),
                edit_link: edit_link(site, current, state.current_file.as_deref()),
            },
        };

        Self {
            title,
            sections: section_views(state, sidebar),
            content,
            menu_open: state.menu_open,
        }
    }

    /// Whether the page shows the not-found view.
    pub fn is_not_found(&self) -> bool {
        self.content == ContentView::NotFound
    }

    /// Whether the page shows a load failure.
    pub fn is_load_failed(&self) -> bool {
        matches!(self.content, ContentView::LoadFailed { .. })
    }
}

fn edit_link(site: &SiteInfo, section: Option<&SidebarSection>, file: Option<&str>) -> Option<String> {
    let base = site.edit_url_base.as_deref()?;
    let path = document_path(&section?.folder, file?);
    Some(format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')))
}

/// The current section stays expanded while a load is pending, failed or
/// the URL did not resolve.
fn section_views(state: &NavigationState, sidebar: &Sidebar) -> Vec<SectionView> {
    sidebar
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let active = index == state.current_section;
            let files = section
                .files
                .iter()
                .map(|file| {
                    let file_active = active && state.current_file.as_deref() == Some(file.as_str());
                    let headings = if file_active {
                        state
                            .headings
                            .iter()
                            .map(|h| HeadingView {
                                label: h.label.clone(),
                                slug: h.slug.clone(),
                                href: format!("#{}", h.slug),
                            })
                            .collect()
                    } else {
                        Vec::new()
                    };
                    FileView {
                        label: section.label(file),
                        href: sidebar.link_href(index, Some(file.as_str())).unwrap_or_default(),
                        active: file_active,
                        headings,
                    }
                })
                .collect();

            SectionView {
                name: section.name.clone(),
                href: sidebar.section_href(index).unwrap_or_default(),
                active,
                files,
            }
        })
        .collect()
}
