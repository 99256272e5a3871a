//! Navigation core for a documentation page.
//!
//! A documentation page is driven by a static sidebar: an ordered list of
//! sections, each holding Markdown files. This crate turns that sidebar and
//! the browser URL into page state, without doing any I/O itself.
//!
//! # Architecture
//!
//! - [`Sidebar`]: the sidebar index and link generation
//! - [`resolve`]: maps `/doc/{section}/{file}` URLs onto the sidebar
//! - [`extract_headings`]: builds the table of contents of a document
//! - [`NavigationState`]: the `(State, Event) -> State` transition function
//! - [`ScrollController`]: fixed-duration scroll animations
//! - [`History`]: session history with attachable navigation observers
//!
//! All URL segments and anchors are produced by [`slugify`], so every link
//! generated from the sidebar resolves back to the entry it came from.
//!
//! # Example
//!
//! ```
//! use docpage_nav::{Effect, Event, Location, NavigationState, Sidebar, SidebarSection};
//!
//! let sidebar = Sidebar::new(vec![SidebarSection {
//!     name: "Command Reference".to_owned(),
//!     folder: "/static/docs/commands".to_owned(),
//!     files: vec!["add.md".to_owned(), "remove.md".to_owned()],
//!     ..Default::default()
//! }])
//! .unwrap();
//!
//! let transition = NavigationState::default().apply(
//!     &sidebar,
//!     Event::Mount(Location::new("/doc/command-reference/remove")),
//! );
//! assert!(matches!(&transition.effects[0], Effect::Fetch(r) if r.file == "remove.md"));
//! ```

mod headings;
mod history;
mod location;
mod resolver;
mod scroll;
mod sidebar;
mod slug;
mod state;

pub use headings::{Heading, extract_headings};
pub use history::{History, LocationReceiver, MemoryHistory, Subscription};
pub use location::Location;
pub use resolver::{Resolution, resolve};
pub use scroll::{Easing, ScrollAnimation, ScrollCommand, ScrollController, ScrollSettings, Viewport};
pub use sidebar::{DOC_ROOT, Sidebar, SidebarError, SidebarSection, SlugCollision};
pub use slug::{file_stem, slugify, start_case};
pub use state::{Effect, Event, LoadRequest, NavigationState, PageStatus, Transition};
