//! HTTP document source.
//!
//! Fetches `{base_url}{folder}/{file}` with a plain GET and expects a UTF-8
//! text body. No authentication, no caching headers.

use std::time::Duration;

use ureq::Agent;

use crate::source::{DocumentSource, SourceError, SourceErrorKind, document_path};

const BACKEND: &str = "Http";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Fetches documents from a web server.
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl HttpSource {
    /// Create a source for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a source with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of a document.
    pub fn url(&self, folder: &str, file: &str) -> String {
        let path = document_path(folder, file);
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Error kind of a non-success HTTP status.
fn classify_status(code: u16) -> SourceErrorKind {
    match code {
        404 | 410 => SourceErrorKind::NotFound,
        401 | 403 => SourceErrorKind::PermissionDenied,
        408 | 504 => SourceErrorKind::Timeout,
        429 | 500..=599 => SourceErrorKind::Unavailable,
        _ => SourceErrorKind::Other,
    }
}

/// Error kind of a failed request that got no response.
fn classify_transport(err: &ureq::Error) -> SourceErrorKind {
    match err {
        ureq::Error::Timeout(_) => SourceErrorKind::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed | ureq::Error::Io(_) => {
            SourceErrorKind::Unavailable
        }
        _ => SourceErrorKind::Other,
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, folder: &str, file: &str) -> Result<String, SourceError> {
        let url = self.url(folder, file);
        tracing::debug!(url = %url, "Fetching document");

        let mut response = self.agent.get(&url).call().map_err(|e| {
            SourceError::new(classify_transport(&e))
                .with_backend(BACKEND)
                .with_path(url.clone())
                .with_source(e)
        })?;

        let code = response.status().as_u16();
        if !response.status().is_success() {
            return Err(SourceError::new(classify_status(code))
                .with_backend(BACKEND)
                .with_path(url)
                .with_source(std::io::Error::other(format!("HTTP {code}"))));
        }

        response.body_mut().read_to_string().map_err(|e| {
            SourceError::new(SourceErrorKind::Other)
                .with_backend(BACKEND)
                .with_path(url.clone())
                .with_source(e)
        })
    }

    fn describe(&self, folder: &str, file: &str) -> String {
        self.url(folder, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_joins_folder_and_file() {
        let source = HttpSource::new("https://example.com/");
        assert_eq!(
            source.url("/static/docs/commands", "add.md"),
            "https://example.com/static/docs/commands/add.md"
        );
    }

    #[test]
    fn test_url_without_folder() {
        let source = HttpSource::new("https://example.com");
        assert_eq!(source.url("", "intro.md"), "https://example.com/intro.md");
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(404), SourceErrorKind::NotFound);
        assert_eq!(classify_status(410), SourceErrorKind::NotFound);
        assert_eq!(classify_status(403), SourceErrorKind::PermissionDenied);
        assert_eq!(classify_status(408), SourceErrorKind::Timeout);
        assert_eq!(classify_status(429), SourceErrorKind::Unavailable);
        assert_eq!(classify_status(503), SourceErrorKind::Unavailable);
        assert_eq!(classify_status(418), SourceErrorKind::Other);
    }

    #[test]
    fn test_unreachable_host_is_unavailable() {
        let source = HttpSource::with_timeout("http://127.0.0.1:1", Duration::from_secs(2));

        let err = source.fetch("/docs", "a.md").unwrap_err();

        assert_eq!(err.backend, Some("Http"));
        assert!(err.is_retryable(), "unexpected error: {err}");
    }
}
