//! Mock document source for testing.
//!
//! Provides [`MockSource`] for unit testing without filesystem or network
//! access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::source::{DocumentSource, SourceError, SourceErrorKind, document_path};

const BACKEND: &str = "Mock";

/// Stored outcome for a document.
#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Failure(SourceErrorKind),
}

/// Mock document source.
///
/// Holds documents in memory, keyed by their [`document_path`]. Unknown
/// documents fail with [`SourceErrorKind::NotFound`].
///
/// # Example
///
/// ```ignore
/// use docpage_source::{DocumentSource, MockSource, SourceErrorKind};
///
/// let source = MockSource::new()
///     .with_document("/docs", "intro.md", "# Intro\n\n## Install\n")
///     .with_failure("/docs", "broken.md", SourceErrorKind::Unavailable);
///
/// assert!(source.fetch("/docs", "intro.md").is_ok());
/// assert!(source.fetch("/docs", "broken.md").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    entries: RwLock<HashMap<String, Entry>>,
    fetches: AtomicUsize,
}

impl MockSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, folder: &str, file: &str, text: impl Into<String>) -> Self {
        self.entries
            .write()
            .unwrap()
            .insert(document_path(folder, file), Entry::Text(text.into()));
        self
    }

    /// Make fetches of a document fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, folder: &str, file: &str, kind: SourceErrorKind) -> Self {
        self.set_failure(folder, file, kind);
        self
    }

    /// Replace the stored outcome of a document with a failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_failure(&self, folder: &str, file: &str, kind: SourceErrorKind) {
        self.entries
            .write()
            .unwrap()
            .insert(document_path(folder, file), Entry::Failure(kind));
    }

    /// Replace the stored outcome of a document with text.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_document(&self, folder: &str, file: &str, text: impl Into<String>) {
        self.entries
            .write()
            .unwrap()
            .insert(document_path(folder, file), Entry::Text(text.into()));
    }

    /// Number of `fetch` calls made so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DocumentSource for MockSource {
    fn fetch(&self, folder: &str, file: &str) -> Result<String, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let path = document_path(folder, file);
        let entry = self.entries.read().unwrap().get(&path).cloned();

        match entry {
            Some(Entry::Text(text)) => Ok(text),
            Some(Entry::Failure(kind)) => Err(SourceError::new(kind)
                .with_backend(BACKEND)
                .with_path(path)),
            None => Err(SourceError::not_found(path).with_backend(BACKEND)),
        }
    }
}
