//! Page endpoints.
//!
//! `/doc/...` serves the rendered HTML page and `/api/page/...` the same
//! page as a JSON [`PageView`]. Both load the document through the page
//! driver, so they agree on resolution, not-found handling and failures.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use docpage_site::{PageView, render_page};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::handlers::to_page_url;
use crate::state::AppState;

const HTML: &str = "text/html; charset=utf-8";
const JSON: &str = "application/json";

/// Handle GET /doc.
pub(crate) async fn get_doc_root(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    html_page(String::new(), state, &headers).await
}

/// Handle GET /doc/{path}.
pub(crate) async fn get_doc(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    html_page(path, state, &headers).await
}

/// Handle GET /api/page/.
pub(crate) async fn get_page_root(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    json_page(String::new(), state, &headers).await
}

/// Handle GET /api/page/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    json_page(path, state, &headers).await
}

async fn html_page(
    path: String,
    state: Arc<AppState>,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let version = state.version.clone();
    let view = load_view(path, state).await?;
    let body = render_page(&view);
    Ok(respond(status_of(&view), HTML, body, &version, headers))
}

async fn json_page(
    path: String,
    state: Arc<AppState>,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let version = state.version.clone();
    let view = load_view(path, state).await?;
    let body = serde_json::to_string(&view)?;
    Ok(respond(status_of(&view), JSON, body, &version, headers))
}

/// Load a page on the blocking pool; document sources do blocking I/O.
async fn load_view(path: String, state: Arc<AppState>) -> Result<PageView, ServerError> {
    let url = to_page_url(&path);
    let view = tokio::task::spawn_blocking(move || state.load_view(&url)).await?;
    if view.is_load_failed() {
        tracing::warn!(path = %path, "Page load failed");
    }
    Ok(view)
}

/// HTTP status for a page view.
fn status_of(view: &PageView) -> StatusCode {
    if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else if view.is_load_failed() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}

/// Build a response, answering conditional requests for successful pages.
fn respond(
    status: StatusCode,
    content_type: &'static str,
    body: String,
    version: &str,
    headers: &HeaderMap,
) -> Response {
    if status != StatusCode::OK {
        return (status, [(header::CONTENT_TYPE, content_type)], body).into_response();
    }

    let etag = compute_etag(version, &body);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    (
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response()
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        assert_ne!(compute_etag("0.1.0", "page"), compute_etag("0.1.1", "page"));
    }

    #[test]
    fn test_compute_etag_includes_content() {
        assert_ne!(compute_etag("0.1.0", "page1"), compute_etag("0.1.0", "page2"));
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("0.1.0", "page");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_respond_not_modified() {
        let etag = compute_etag("0.1.0", "body");
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, etag.parse().unwrap());

        let response = respond(StatusCode::OK, HTML, "body".to_owned(), "0.1.0", &headers);

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[test]
    fn test_respond_error_has_no_etag() {
        let response = respond(
            StatusCode::NOT_FOUND,
            HTML,
            "body".to_owned(),
            "0.1.0",
            &HeaderMap::new(),
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::ETAG).is_none());
    }
}
