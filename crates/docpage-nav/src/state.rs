//! Navigation state machine.
//!
//! All page behaviour is expressed as [`NavigationState::apply`], a pure
//! transition from a state and an [`Event`] to the next state plus the
//! [`Effect`]s the host has to carry out (fetch a document, push a history
//! entry, scroll). Fetch results come back as [`Event::LoadCompleted`].
//!
//! Every fetch carries a sequence number. Only the completion matching the
//! most recent request is applied, so a slow response can never overwrite
//! the page the user navigated to afterwards.

use crate::headings::{Heading, extract_headings};
use crate::location::Location;
use crate::resolver::{Resolution, resolve};
use crate::scroll::ScrollCommand;
use crate::sidebar::Sidebar;

/// A document fetch issued by the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    /// Sequence number; completions with any other number are stale.
    pub seq: u64,
    /// Section index.
    pub section: usize,
    /// Filename within the section.
    pub file: String,
    /// Whether to build the table of contents once loaded.
    pub parse_headings: bool,
}

/// What the content area currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PageStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight. Previous content stays visible.
    Loading,
    /// The current document is loaded.
    Ready,
    /// The URL did not resolve against the sidebar.
    NotFound,
    /// The last fetch failed.
    LoadFailed(String),
}

/// An input to the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The page was mounted at this location.
    Mount(Location),
    /// The user moved through history.
    PopState(Location),
    /// A section entry in the menu was clicked.
    SectionClicked(usize),
    /// A file entry in the menu was clicked.
    FileClicked {
        /// Section index.
        section: usize,
        /// Filename within the section.
        file: String,
    },
    /// A table of contents entry was clicked.
    HeadingClicked(String),
    /// The mobile menu button was pressed.
    ToggleMenu,
    /// A fetch finished.
    LoadCompleted {
        /// Sequence number of the request.
        seq: u64,
        /// Document text, or a failure message.
        result: Result<String, String>,
    },
    /// Retry the last failed load.
    Retry,
}

/// Work the host must perform after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a document and report back with [`Event::LoadCompleted`].
    Fetch(LoadRequest),
    /// Push a history entry without reloading.
    PushHistory(String),
    /// Scroll the content container.
    Scroll(ScrollCommand),
}

/// Result of applying an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The next state.
    pub state: NavigationState,
    /// Effects to perform, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: NavigationState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// State of a documentation page.
///
/// `current_file`, when set, is always the index file or one of the files
/// of `current_section`: both are replaced together when a load completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Index of the active sidebar section.
    pub current_section: usize,
    /// Currently displayed file.
    pub current_file: Option<String>,
    /// Raw Markdown of the current file.
    pub document_text: String,
    /// Table of contents of the current file.
    pub headings: Vec<Heading>,
    /// Content status.
    pub status: PageStatus,
    /// Whether the mobile menu is open.
    pub menu_open: bool,
    /// Fragment to scroll to once headings are available.
    pub fragment: Option<String>,
    pending: Option<LoadRequest>,
    last_request: Option<LoadRequest>,
    next_seq: u64,
}

impl NavigationState {
    /// Whether the not-found view is shown.
    pub fn is_not_found(&self) -> bool {
        self.status == PageStatus::NotFound
    }

    /// The fetch currently awaited, if any.
    pub fn pending(&self) -> Option<&LoadRequest> {
        self.pending.as_ref()
    }

    /// Apply an event.
    #[must_use]
    pub fn apply(self, sidebar: &Sidebar, event: Event) -> Transition {
        match event {
            Event::Mount(location) | Event::PopState(location) => {
                self.navigate_to(sidebar, &location)
            }
            Event::SectionClicked(section) => self.select_section(sidebar, section),
            Event::FileClicked { section, file } => self.select_file(sidebar, section, file),
            Event::HeadingClicked(slug) => Transition {
                state: self,
                effects: vec![Effect::Scroll(ScrollCommand::Anchor(slug))],
            },
            Event::ToggleMenu => Transition::unchanged(Self {
                menu_open: !self.menu_open,
                ..self
            }),
            Event::LoadCompleted { seq, result } => self.complete_load(seq, result),
            Event::Retry => self.retry(),
        }
    }

    fn navigate_to(mut self, sidebar: &Sidebar, location: &Location) -> Transition {
        self.fragment.clone_from(&location.hash);

        let resolution = resolve(sidebar, location);
        tracing::debug!(path = %location.pathname, ?resolution, "Resolved location");

        match resolution {
            Resolution::File { section, file } => self.begin_load(section, file, true, Vec::new()),
            Resolution::Section { section } => self.load_default(sidebar, section, Vec::new()),
            Resolution::Default => self.load_default(sidebar, 0, Vec::new()),
            Resolution::NotFound { segment } => {
                tracing::debug!(segment = %segment, "Location not found");
                self.not_found()
            }
        }
    }

    fn select_section(mut self, sidebar: &Sidebar, section: usize) -> Transition {
        let Some(href) = sidebar.section_href(section) else {
            tracing::warn!(section, "Section index out of range");
            return Transition::unchanged(self);
        };
        self.fragment = None;
        self.load_default(sidebar, section, vec![Effect::PushHistory(href)])
    }

    fn select_file(mut self, sidebar: &Sidebar, section: usize, file: String) -> Transition {
        let known = sidebar.section(section).is_some_and(|s| s.contains(&file));
        let href = sidebar.link_href(section, Some(file.as_str()));
        let (true, Some(href)) = (known, href) else {
            tracing::warn!(section, file = %file, "File not in sidebar");
            return self.not_found();
        };
        self.fragment = None;
        self.begin_load(section, file, true, vec![Effect::PushHistory(href)])
    }

    fn load_default(self, sidebar: &Sidebar, section: usize, effects: Vec<Effect>) -> Transition {
        match sidebar.section(section).and_then(|s| s.default_file()) {
            Some(file) => self.begin_load(section, file.to_owned(), false, effects),
            None => self.not_found(),
        }
    }

    fn begin_load(
        mut self,
        section: usize,
        file: String,
        parse_headings: bool,
        mut effects: Vec<Effect>,
    ) -> Transition {
        let request = LoadRequest {
            seq: self.next_seq,
            section,
            file,
            parse_headings,
        };
        self.next_seq += 1;
        self.status = PageStatus::Loading;
        self.pending = Some(request.clone());
        self.last_request = Some(request.clone());
        effects.push(Effect::Fetch(request));
        Transition {
            state: self,
            effects,
        }
    }

    fn not_found(mut self) -> Transition {
        self.status = PageStatus::NotFound;
        self.pending = None;
        Transition::unchanged(self)
    }

    fn complete_load(mut self, seq: u64, result: Result<String, String>) -> Transition {
        let request = match self.pending.take() {
            Some(request) if request.seq == seq => request,
            other => {
                tracing::debug!(seq, "Discarding stale load");
                self.pending = other;
                return Transition::unchanged(self);
            }
        };

        self.menu_open = false;
        match result {
            Ok(text) => {
                let mut effects = vec![Effect::Scroll(ScrollCommand::Top)];
                self.headings = if request.parse_headings {
                    extract_headings(&text)
                } else {
                    Vec::new()
                };
                if request.parse_headings
                    && let Some(fragment) = &self.fragment
                {
                    effects.push(Effect::Scroll(ScrollCommand::Anchor(fragment.clone())));
                }
                self.current_section = request.section;
                self.current_file = Some(request.file);
                self.document_text = text;
                self.status = PageStatus::Ready;
                Transition {
                    state: self,
                    effects,
                }
            }
            Err(message) => {
                tracing::warn!(file = %request.file, error = %message, "Failed to load document");
                self.status = PageStatus::LoadFailed(message);
                Transition::unchanged(self)
            }
        }
    }

    fn retry(self) -> Transition {
        let failed = matches!(self.status, PageStatus::LoadFailed(_));
        match self.last_request.clone() {
            Some(request) if failed => {
                self.begin_load(request.section, request.file, request.parse_headings, Vec::new())
            }
            _ => Transition::unchanged(self),
        }
    }
}
