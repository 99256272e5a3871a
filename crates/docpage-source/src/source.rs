//! The [`DocumentSource`] trait and its error type.
//!
//! Documents are addressed the way the sidebar names them, by section folder
//! (`/static/docs/commands`) and filename (`add.md`). Each backend maps the
//! pair onto its own storage; [`document_path`] is the common join.

/// Why a fetch failed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum SourceErrorKind {
    NotFound,
    PermissionDenied,
    /// Folder or filename escapes the source root.
    InvalidPath,
    /// Backend down or overloaded.
    Unavailable,
    Timeout,
    Other,
}

impl SourceErrorKind {
    /// Retry guidance when the backend gives none.
    pub fn default_status(self) -> ErrorStatus {
        match self {
            Self::Unavailable | Self::Timeout => ErrorStatus::Temporary,
            _ => ErrorStatus::Permanent,
        }
    }
}

impl std::fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidPath => "Invalid path",
            Self::Unavailable => "Unavailable",
            Self::Timeout => "Timeout",
            Self::Other => "Error",
        })
    }
}

/// Whether the same fetch is worth repeating.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy)]
pub enum ErrorStatus {
    #[default]
    Permanent,
    Temporary,
}

/// Failed document fetch.
///
/// Displays as `[Backend] Kind: cause (path: location)`, each part present
/// only when known. This string is what the page shows under "Failed to
/// load page".
#[derive(Debug)]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub status: ErrorStatus,
    /// Document location (file path or URL).
    pub path: Option<String>,
    /// Backend name: `Fs`, `Http` or `Mock`.
    pub backend: Option<&'static str>,
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Error of `kind` with the kind's default retry status.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            status: kind.default_status(),
            path: None,
            backend: None,
            cause: None,
        }
    }

    #[must_use]
    pub fn with_path(self, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_backend(self, backend: &'static str) -> Self {
        Self {
            backend: Some(backend),
            ..self
        }
    }

    #[must_use]
    pub fn with_status(self, status: ErrorStatus) -> Self {
        Self { status, ..self }
    }

    #[must_use]
    pub fn with_source(self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            cause: Some(Box::new(cause)),
            ..self
        }
    }

    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NotFound).with_path(path)
    }

    /// Whether retrying the same fetch may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.status == ErrorStatus::Temporary
    }

    /// Classify an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<String>) -> Self {
        use std::io::ErrorKind;

        let (kind, status) = match err.kind() {
            ErrorKind::NotFound => (SourceErrorKind::NotFound, ErrorStatus::Permanent),
            ErrorKind::PermissionDenied => {
                (SourceErrorKind::PermissionDenied, ErrorStatus::Permanent)
            }
            ErrorKind::TimedOut => (SourceErrorKind::Timeout, ErrorStatus::Temporary),
            ErrorKind::Interrupted => (SourceErrorKind::Other, ErrorStatus::Temporary),
            _ => (SourceErrorKind::Other, ErrorStatus::Permanent),
        };
        Self {
            path,
            ..Self::new(kind).with_status(status).with_source(err)
        }
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {path})")?;
        }
        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Join a section folder and filename into a document path.
///
/// `("/static/docs/commands", "add.md")` becomes
/// `/static/docs/commands/add.md`. An empty folder yields the bare filename.
pub fn document_path(folder: &str, file: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        file.to_owned()
    } else {
        format!("{folder}/{file}")
    }
}

/// Fetches the Markdown text of sidebar documents.
///
/// Implementations must be usable from multiple threads; the HTTP server
/// shares one source across requests.
pub trait DocumentSource: Send + Sync {
    /// Fetch the document `file` of the section stored in `folder`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document doesn't exist or can't be read.
    fn fetch(&self, folder: &str, file: &str) -> Result<String, SourceError>;

    /// Human-readable location of a document, for logs and edit links.
    fn describe(&self, folder: &str, file: &str) -> String {
        document_path(folder, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_path() {
        assert_eq!(
            document_path("/static/docs/commands", "add.md"),
            "/static/docs/commands/add.md"
        );
        assert_eq!(document_path("/static/docs/", "add.md"), "/static/docs/add.md");
        assert_eq!(document_path("", "add.md"), "add.md");
    }

    #[test]
    fn test_default_status_follows_kind() {
        assert!(!SourceError::new(SourceErrorKind::NotFound).is_retryable());
        assert!(!SourceError::new(SourceErrorKind::InvalidPath).is_retryable());
        assert!(SourceError::new(SourceErrorKind::Unavailable).is_retryable());
        assert!(SourceError::new(SourceErrorKind::Timeout).is_retryable());
        assert!(
            !SourceError::new(SourceErrorKind::Timeout)
                .with_status(ErrorStatus::Permanent)
                .is_retryable()
        );
    }

    #[test]
    fn test_source_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SourceError::io(io_err, Some("/docs/a.md".to_owned()));

        assert_eq!(err.kind, SourceErrorKind::NotFound);
        assert_eq!(err.status, ErrorStatus::Permanent);
        assert_eq!(err.path.as_deref(), Some("/docs/a.md"));
    }

    #[test]
    fn test_source_error_io_timeout_is_retryable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = SourceError::io(io_err, None);

        assert_eq!(err.kind, SourceErrorKind::Timeout);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_source_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SourceError::new(SourceErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/docs/a.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: /docs/a.md)"
        );
    }

    #[test]
    fn test_source_error_display_simple() {
        assert_eq!(SourceError::new(SourceErrorKind::Timeout).to_string(), "Timeout");
    }

    #[test]
    fn test_source_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceError>();
    }
}
