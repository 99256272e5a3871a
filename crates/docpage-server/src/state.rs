//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use docpage_nav::{MemoryHistory, ScrollSettings, Sidebar};
use docpage_site::{DocumentationPage, PageView, SiteInfo, StaticViewport};
use docpage_source::DocumentSource;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Sidebar of the site.
    pub(crate) sidebar: Arc<Sidebar>,
    /// Where documents are fetched from.
    pub(crate) source: Arc<dyn DocumentSource>,
    /// Title and edit links.
    pub(crate) site: SiteInfo,
    /// Scroll timing handed to pages.
    pub(crate) scroll: ScrollSettings,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Load the page at `url` and build its view.
    ///
    /// Blocks on the document source; call from a blocking task.
    pub(crate) fn load_view(&self, url: &str) -> PageView {
        let mut page = DocumentationPage::new(
            Arc::clone(&self.sidebar),
            Arc::clone(&self.source),
            MemoryHistory::new(url),
            StaticViewport::new(),
            self.scroll.clone(),
        );
        page.mount();
        page.pump();
        page.view(&self.site)
    }
}
