//! Documentation page driver.
//!
//! [`DocumentationPage`] owns the navigation state and runs the effects the
//! state machine asks for: history pushes, scroll animations and document
//! fetches.
//!
//! Fetches are queued by [`DocumentationPage::dispatch`] and performed by
//! [`DocumentationPage::pump`], so several navigations can be issued before
//! any document arrives. Only the most recent request is fetched; responses
//! to superseded requests are dropped by the state machine.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use docpage_nav::{
    Effect, Event, History, LoadRequest, LocationReceiver, NavigationState, ScrollController,
    ScrollSettings, Sidebar, Subscription, Viewport,
};
use docpage_source::DocumentSource;

use crate::view::{PageView, SiteInfo};

/// A documentation page bound to a history and a viewport.
pub struct DocumentationPage<H: History, V: Viewport> {
    sidebar: Arc<Sidebar>,
    source: Arc<dyn DocumentSource>,
    history: H,
    viewport: V,
    scroll: ScrollController,
    state: NavigationState,
    queue: VecDeque<LoadRequest>,
    observer: Option<(LocationReceiver, Subscription)>,
}

impl<H: History, V: Viewport> DocumentationPage<H, V> {
    /// Create an unmounted page.
    pub fn new(
        sidebar: Arc<Sidebar>,
        source: Arc<dyn DocumentSource>,
        history: H,
        viewport: V,
        scroll: ScrollSettings,
    ) -> Self {
        Self {
            sidebar,
            source,
            history,
            viewport,
            scroll: ScrollController::new(scroll),
            state: NavigationState::default(),
            queue: VecDeque::new(),
            observer: None,
        }
    }

    /// Attach the navigation observer and resolve the current location.
    ///
    /// Mounting an already mounted page re-resolves the location without
    /// attaching a second observer.
    pub fn mount(&mut self) {
        if self.observer.is_none() {
            self.observer = Some(self.history.subscribe());
        }
        let location = self.history.location();
        self.dispatch(Event::Mount(location));
    }

    /// Detach the navigation observer and cancel queued fetches.
    pub fn unmount(&mut self) {
        if let Some((_, subscription)) = self.observer.take() {
            subscription.detach();
        }
        self.queue.clear();
    }

    /// Whether the navigation observer is attached.
    pub fn is_mounted(&self) -> bool {
        self.observer.is_some()
    }

    /// Apply an event and run the resulting effects.
    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let transition = state.apply(&self.sidebar, event);
        self.state = transition.state;

        for effect in transition.effects {
            match effect {
                Effect::Fetch(request) => self.queue.push_back(request),
                Effect::PushHistory(href) => self.history.push_state(&href),
                Effect::Scroll(command) => {
                    self.scroll.start(&command, &self.viewport);
                }
            }
        }
    }

    /// Perform queued fetches and feed their results back.
    ///
    /// Returns the number of documents fetched.
    pub fn pump(&mut self) -> usize {
        let mut fetched = 0;
        while let Some(request) = self.queue.pop_front() {
            if self.state.pending().map(|p| p.seq) != Some(request.seq) {
                tracing::debug!(seq = request.seq, file = %request.file, "Skipping superseded fetch");
                continue;
            }
            let Some(section) = self.sidebar.section(request.section) else {
                continue;
            };

            let result = self
                .source
                .fetch(&section.folder, &request.file)
                .map_err(|e| e.to_string());
            fetched += 1;
            self.dispatch(Event::LoadCompleted {
                seq: request.seq,
                result,
            });
        }
        fetched
    }

    /// Turn pending pop-state notifications into navigation events.
    ///
    /// Returns the number of notifications handled.
    pub fn poll_history(&mut self) -> usize {
        let locations = match &self.observer {
            Some((receiver, _)) => receiver.drain(),
            None => return 0,
        };
        let count = locations.len();
        for location in locations {
            self.dispatch(Event::PopState(location));
        }
        count
    }

    /// Advance the scroll animation. Returns `true` while it is running.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.scroll.tick(delta, &mut self.viewport)
    }

    /// Run the scroll animation to completion.
    pub fn finish_scroll(&mut self) {
        self.scroll.finish(&mut self.viewport);
    }

    /// Build the view model of the page.
    pub fn view(&self, site: &SiteInfo) -> PageView {
        PageView::build(&self.state, &self.sidebar, site, &self.history.location())
    }

    /// Navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Sidebar.
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// History.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable history, for driving back and forward navigation.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Viewport.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable viewport, for registering anchors after layout.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Scroll controller.
    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }
}

impl<H: History, V: Viewport> Drop for DocumentationPage<H, V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::StaticViewport;
    use docpage_nav::{Location, MemoryHistory, PageStatus, SidebarSection};
    use docpage_source::{MockSource, SourceErrorKind};
    use pretty_assertions::assert_eq;

    const REMOVE: &str = "# dvc remove\n\nRemove data.\n## Synopsis\n\n## Options\n\n## Examples\n";

    fn sidebar() -> Arc<Sidebar> {
        Arc::new(
            Sidebar::new(vec![
                SidebarSection {
                    name: "Get Started".to_owned(),
                    folder: "/static/docs/get-started".to_owned(),
                    files: vec!["install.md".to_owned(), "tutorial.md".to_owned()],
                    ..Default::default()
                },
                SidebarSection {
                    name: "Command Reference".to_owned(),
                    folder: "/static/docs/commands".to_owned(),
                    files: vec!["add.md".to_owned(), "remove.md".to_owned()],
                    index_file: Some("index.md".to_owned()),
                    ..Default::default()
                },
            ])
            .unwrap(),
        )
    }

    fn source() -> Arc<MockSource> {
        Arc::new(
            MockSource::new()
                .with_document("/static/docs/get-started", "install.md", "# Install\n\n## Pip\n")
                .with_document("/static/docs/get-started", "tutorial.md", "# Tutorial\n")
                .with_document("/static/docs/commands", "index.md", "# Commands\n\n## All\n")
                .with_document("/static/docs/commands", "add.md", "# dvc add\n\n## Options\n")
                .with_document("/static/docs/commands", "remove.md", REMOVE),
        )
    }

    fn page_at(
        url: &str,
        source: Arc<MockSource>,
    ) -> DocumentationPage<MemoryHistory, StaticViewport> {
        DocumentationPage::new(
            sidebar(),
            source,
            MemoryHistory::new(url),
            StaticViewport::new(),
            ScrollSettings::default(),
        )
    }

    #[test]
    fn test_mount_loads_file_with_headings() {
        let mut page = page_at("/doc/command-reference/remove", source());

        page.mount();
        assert_eq!(page.state().status, PageStatus::Loading);
        assert_eq!(page.pump(), 1);

        let state = page.state();
        assert_eq!(state.status, PageStatus::Ready);
        assert_eq!(state.current_section, 1);
        assert_eq!(state.current_file.as_deref(), Some("remove.md"));
        assert_eq!(state.document_text, REMOVE);
        assert_eq!(
            state.headings.iter().map(|h| h.label.as_str()).collect::<Vec<_>>(),
            vec!["Synopsis", "Options", "Examples"]
        );
    }

    #[test]
    fn test_mount_root_loads_first_file() {
        let mut page = page_at("/doc", source());

        page.mount();
        page.pump();

        assert_eq!(page.state().current_section, 0);
        assert_eq!(page.state().current_file.as_deref(), Some("install.md"));
        assert!(page.state().headings.is_empty());
        assert_eq!(page.history().len(), 1);
    }

    #[test]
    fn test_mount_unknown_section_is_not_found() {
        let source = source();
        let mut page = page_at("/doc/unknown", Arc::clone(&source));

        page.mount();

        assert!(page.state().is_not_found());
        assert_eq!(page.pump(), 0);
        assert_eq!(source.fetch_count(), 0);
    }

    #[test]
    fn test_file_click_pushes_history() {
        let mut page = page_at("/doc", source());
        page.mount();
        page.pump();

        page.dispatch(Event::FileClicked {
            section: 1,
            file: "add.md".to_owned(),
        });
        page.pump();

        assert_eq!(
            page.history().location(),
            Location::new("/doc/command-reference/add")
        );
        assert_eq!(page.history().len(), 2);
        assert_eq!(page.state().current_file.as_deref(), Some("add.md"));
        assert_eq!(page.state().headings.len(), 1);
    }

    #[test]
    fn test_section_click_pushes_section_href() {
        let mut page = page_at("/doc", source());
        page.mount();
        page.pump();

        page.dispatch(Event::SectionClicked(1));
        page.pump();

        assert_eq!(page.history().location().pathname, "/doc/command-reference");
        assert_eq!(page.state().current_file.as_deref(), Some("index.md"));
    }

    #[test]
    fn test_back_navigation_restores_previous_document() {
        let mut page = page_at("/doc/get-started/tutorial", source());
        page.mount();
        page.pump();
        page.dispatch(Event::FileClicked {
            section: 1,
            file: "remove.md".to_owned(),
        });
        page.pump();

        assert!(page.history_mut().back());
        assert_eq!(page.poll_history(), 1);
        page.pump();

        assert_eq!(page.state().current_section, 0);
        assert_eq!(page.state().current_file.as_deref(), Some("tutorial.md"));
        assert_eq!(page.history().len(), 2);
    }

    #[test]
    fn test_unmount_detaches_observer() {
        let mut page = page_at("/doc", source());
        page.mount();
        assert_eq!(page.history().observer_count(), 1);

        page.mount();
        assert_eq!(page.history().observer_count(), 1);

        page.unmount();
        assert!(!page.is_mounted());
        assert_eq!(page.history().observer_count(), 0);
        assert_eq!(page.poll_history(), 0);
    }

    #[test]
    fn test_rapid_navigation_fetches_latest_only() {
        let source = source();
        let mut page = page_at("/doc", Arc::clone(&source));
        page.mount();

        page.dispatch(Event::FileClicked {
            section: 1,
            file: "add.md".to_owned(),
        });
        page.dispatch(Event::FileClicked {
            section: 1,
            file: "remove.md".to_owned(),
        });

        assert_eq!(page.pump(), 1);
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(page.state().current_file.as_deref(), Some("remove.md"));
        assert_eq!(page.history().len(), 3);
    }

    #[test]
    fn test_load_failure_and_retry() {
        let source = Arc::new(
            MockSource::new().with_failure(
                "/static/docs/commands",
                "add.md",
                SourceErrorKind::Unavailable,
            ),
        );
        let mut page = DocumentationPage::new(
            sidebar(),
            Arc::clone(&source) as Arc<dyn DocumentSource>,
            MemoryHistory::new("/doc/command-reference/add"),
            StaticViewport::new(),
            ScrollSettings::default(),
        );
        page.mount();
        page.pump();

        let PageStatus::LoadFailed(message) = &page.state().status else {
            panic!("expected failure, got {:?}", page.state().status);
        };
        assert!(message.contains("Unavailable"), "message: {message}");

        source.set_document("/static/docs/commands", "add.md", "# dvc add\n");
        page.dispatch(Event::Retry);
        page.pump();

        assert_eq!(page.state().status, PageStatus::Ready);
        assert_eq!(page.state().current_file.as_deref(), Some("add.md"));
    }

    #[test]
    fn test_fragment_scrolls_to_anchor_after_load() {
        let mut page = DocumentationPage::new(
            sidebar(),
            source(),
            MemoryHistory::new("/doc/command-reference/remove#options"),
            StaticViewport::new().with_anchor("options", 500.0),
            ScrollSettings::default(),
        );
        page.mount();
        page.pump();

        let animation = page.scroll().active().expect("anchor animation");
        assert_eq!(animation.to, 415.0);
        assert_eq!(animation.duration, Duration::from_millis(600));

        page.finish_scroll();
        assert_eq!(page.viewport().scroll_top(), 415.0);
    }

    #[test]
    fn test_heading_click_animates_scroll() {
        let mut page = page_at("/doc/command-reference/remove", source());
        page.viewport_mut().set_anchors([("examples".to_owned(), 1000.0)]);
        page.mount();
        page.pump();
        page.finish_scroll();

        page.dispatch(Event::HeadingClicked("examples".to_owned()));
        assert!(page.tick(Duration::from_millis(300)));
        let midway = page.viewport().scroll_top();
        assert!(midway > 0.0 && midway < 915.0, "midway: {midway}");
        assert!(!page.tick(Duration::from_millis(300)));
        assert_eq!(page.viewport().scroll_top(), 915.0);
        assert_eq!(page.history().len(), 1);
    }

    #[test]
    fn test_load_scrolls_to_top() {
        let mut page = page_at("/doc/command-reference/add", source());
        page.viewport_mut().set_scroll_top(700.0);
        page.mount();
        page.pump();

        let animation = page.scroll().active().expect("top animation");
        assert_eq!(animation.from, 700.0);
        assert_eq!(animation.to, 0.0);
        assert_eq!(
            page.scroll().settings().top_duration,
            Duration::from_millis(300)
        );
    }
}
