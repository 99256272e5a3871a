//! Document sources for docpage.
//!
//! This crate provides a [`DocumentSource`] trait for fetching the Markdown
//! text of sidebar documents, keeping the page logic independent of where
//! documents live.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`DocumentSource`] trait with `fetch()` and `describe()` methods
//! - [`FsSource`] reading documents from a local directory
//! - [`HttpSource`] fetching documents from a web server
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use docpage_source::{DocumentSource, FsSource};
//!
//! let source = FsSource::new("site");
//! let text = source.fetch("/static/docs/commands", "add.md")?;
//! ```

mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use fs::FsSource;
pub use http::HttpSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{DocumentSource, ErrorStatus, SourceError, SourceErrorKind, document_path};
