//! Documentation page for docpage.
//!
//! Ties the navigation core to a document source:
//!
//! - [`DocumentationPage`]: runs navigation events, history pushes, scroll
//!   animations and document fetches
//! - [`PageView`]: serializable view model of the page
//! - [`render_page`]: HTML rendering of a [`PageView`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docpage_nav::{MemoryHistory, ScrollSettings};
//! use docpage_site::{DocumentationPage, SiteInfo, StaticViewport, render_page};
//!
//! let mut page = DocumentationPage::new(
//!     sidebar,
//!     source,
//!     MemoryHistory::new("/doc/command-reference/add"),
//!     StaticViewport::new(),
//!     ScrollSettings::default(),
//! );
//! page.mount();
//! page.pump();
//! let html = render_page(&page.view(&SiteInfo::default()));
//! ```

mod page;
mod render;
mod view;
mod viewport;

pub use page::DocumentationPage;
pub use render::{escape_html, render_markdown, render_page};
pub use view::{ContentView, FileView, HeadingView, PageView, SectionView, SiteInfo};
pub use viewport::StaticViewport;
