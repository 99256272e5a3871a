//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware::map_response;
use axum::response::Redirect;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/sidebar", get(handlers::sidebar::get_sidebar))
        .route("/api/page/", get(handlers::pages::get_page_root))
        .route("/api/page/{*path}", get(handlers::pages::get_page));

    let page_routes = Router::new()
        .route("/", get(|| async { Redirect::permanent("/doc") }))
        .route("/doc", get(handlers::pages::get_doc_root))
        .route("/doc/", get(handlers::pages::get_doc_root))
        .route("/doc/{*path}", get(handlers::pages::get_doc));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .route("/health", get(handlers::health::get_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(map_response(security::add_security_headers)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use docpage_nav::{ScrollSettings, Sidebar, SidebarSection};
    use docpage_site::SiteInfo;
    use docpage_source::{MockSource, SourceErrorKind};
    use tower::ServiceExt;

    fn router() -> Router {
        let sidebar = Sidebar::new(vec![
            SidebarSection {
                name: "Get Started".to_owned(),
                folder: "/static/docs/get-started".to_owned(),
                files: vec!["install.md".to_owned()],
                ..Default::default()
            },
            SidebarSection {
                name: "Command Reference".to_owned(),
                folder: "/static/docs/commands".to_owned(),
                files: vec!["add.md".to_owned(), "push.md".to_owned()],
                index_file: Some("index.md".to_owned()),
                ..Default::default()
            },
        ])
        .unwrap();
        let source = MockSource::new()
            .with_document("/static/docs/get-started", "install.md", "# Install\n\n## Pip\n")
            .with_document("/static/docs/commands", "index.md", "# Commands\n")
            .with_document("/static/docs/commands", "add.md", "# dvc add\n\n## Options\n")
            .with_failure("/static/docs/commands", "push.md", SourceErrorKind::Unavailable);

        create_router(Arc::new(AppState {
            sidebar: Arc::new(sidebar),
            source: Arc::new(source),
            site: SiteInfo {
                title: "Docs".to_owned(),
                edit_url_base: None,
            },
            scroll: ScrollSettings::default(),
            version: "0.1.0".to_owned(),
        }))
    }

    async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_doc_root_serves_first_file() {
        let (status, headers, body) = get("/doc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert!(headers.contains_key(header::ETAG));
        assert!(body.contains("<title>Get Started | Docs</title>"), "body: {body}");
        assert!(body.contains("<h1>Install</h1>"));
    }

    #[tokio::test]
    async fn test_doc_file_serves_headings() {
        let (status, _, body) = get("/doc/command-reference/add").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h2 id=\"options\">Options</h2>"));
        assert!(body.contains("<a href=\"#options\">Options</a>"));
    }

    #[tokio::test]
    async fn test_doc_unknown_is_404() {
        let (status, _, body) = get("/doc/command-reference/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Not found"));
    }

    #[tokio::test]
    async fn test_doc_load_failure_is_502() {
        let (status, _, body) = get("/doc/command-reference/push").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("href=\"/doc/command-reference/push\">Retry</a>"));
    }

    #[tokio::test]
    async fn test_api_page_json() {
        let (status, headers, body) = get("/api/page/command-reference").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Command Reference | Docs");
        assert_eq!(json["content"]["kind"], "markdown");
        assert_eq!(json["content"]["text"], "# Commands\n");
    }

    #[tokio::test]
    async fn test_api_page_root() {
        let (status, _, body) = get("/api/page/").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sections"][0]["active"], true);
    }

    #[tokio::test]
    async fn test_api_sidebar() {
        let (status, _, body) = get("/api/sidebar").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sections"][1]["href"], "/doc/command-reference");
        assert_eq!(json["sections"][1]["files"][1]["href"], "/doc/command-reference/push");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get("/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sections"], 2);
    }

    #[tokio::test]
    async fn test_if_none_match_returns_304() {
        let (_, headers, _) = get("/doc/get-started/install").await;
        let etag = headers[header::ETAG].clone();

        let response = router()
            .oneshot(
                Request::get("/doc/get-started/install")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_root_redirects_to_doc() {
        let (status, headers, _) = get("/").await;

        assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
        assert_eq!(headers[header::LOCATION], "/doc");
    }
}
