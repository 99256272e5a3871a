//! HTTP server for docpage.
//!
//! This crate provides an axum server that renders documentation pages on
//! request:
//! - `/doc/{section}/{file}`: HTML page with sidebar and table of contents
//! - `/api/page/{section}/{file}`: the same page as JSON
//! - `/api/sidebar`: sections, files and their links
//! - `/health`: liveness probe
//!
//! Every request runs a fresh page driver against the shared sidebar and
//! document source.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docpage_server::{ServerConfig, run_server};
//! use docpage_source::FsSource;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let source = Arc::new(FsSource::new("site"));
//!     run_server(config, Arc::new(sidebar), source).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use docpage_nav::{ScrollSettings, Sidebar};
use docpage_site::SiteInfo;
use docpage_source::DocumentSource;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Title and edit links.
    pub site: SiteInfo,
    /// Scroll timing handed to pages.
    pub scroll: ScrollSettings,
    /// Mixed into page ETags so a new release invalidates cached pages.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            site: SiteInfo {
                title: "Documentation".to_owned(),
                edit_url_base: None,
            },
            scroll: ScrollSettings::default(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(
    config: ServerConfig,
    sidebar: Arc<Sidebar>,
    source: Arc<dyn DocumentSource>,
) -> Result<(), ServerError> {
    for collision in sidebar.collisions() {
        tracing::warn!(
            slug = %collision.slug,
            first = %collision.first,
            second = %collision.second,
            "Sidebar entries share a URL slug; only the first is reachable"
        );
    }

    let sidebar_len = sidebar.len();
    let state = Arc::new(AppState {
        sidebar,
        source,
        site: config.site,
        scroll: config.scroll,
        version: config.version,
    });
    let app = app::create_router(state);

    let address = format!("{}:{}", config.host, config.port);
    let addr: SocketAddr = address
        .parse()
        .map_err(|source| ServerError::Address {
            address: address.clone(),
            source,
        })?;
    tracing::info!(address = %addr, sections = sidebar_len, "Serving documentation");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl-C received, draining connections");
}
