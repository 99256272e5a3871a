//! CLI command implementations.

pub(crate) mod links;
pub(crate) mod resolve;
pub(crate) mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docpage_config::{CliSettings, Config, DocsSource};
use docpage_nav::{Sidebar, SlugCollision};
use docpage_site::SiteInfo;
use docpage_source::{DocumentSource, FsSource, HttpSource};

use crate::error::CliError;

pub(crate) use links::LinksArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use serve::ServeArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover docpage.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read documents from this directory (overrides config).
    #[arg(short, long, conflicts_with = "base_url")]
    source_dir: Option<PathBuf>,

    /// Fetch documents from this URL (overrides config).
    #[arg(long, env = "DOCPAGE_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration, applying `host` and `port` overrides.
    fn load_config(&self, host: Option<String>, port: Option<u16>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host,
            port,
            source_dir: self.source_dir.clone(),
            base_url: self.base_url.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        match &config.config_path {
            Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
            None => tracing::info!("No docpage.toml found, using defaults"),
        }
        Ok(config)
    }
}

/// Sidebar, document source and site settings built from configuration.
pub(crate) struct Site {
    pub sidebar: Arc<Sidebar>,
    pub source: Arc<dyn DocumentSource>,
    pub info: SiteInfo,
}

impl Site {
    fn from_config(config: &Config) -> Result<Self, CliError> {
        let sidebar = config.sidebar()?;
        tracing::info!(
            sections = sidebar.len(),
            source = %describe_source(&config.docs_resolved.source),
            "Loaded sidebar"
        );
        Ok(Self {
            sidebar: Arc::new(sidebar),
            source: document_source(&config.docs_resolved.source),
            info: SiteInfo {
                title: config.site.title.clone(),
                edit_url_base: config.site.edit_url_base.clone(),
            },
        })
    }
}

/// Document source for the configured location.
fn document_source(source: &DocsSource) -> Arc<dyn DocumentSource> {
    match source {
        DocsSource::Dir(dir) => Arc::new(FsSource::new(dir)),
        DocsSource::Url(url) => Arc::new(HttpSource::new(url)),
    }
}

/// Warning text for two sidebar entries sharing a URL slug.
fn describe_collision(sidebar: &Sidebar, collision: &SlugCollision) -> String {
    let names = match collision.section {
        Some(index) => sidebar.section(index).map(|section| {
            let file = |i: usize| section.files.get(i).map_or("?", String::as_str);
            (
                format!("{} ({})", file(collision.first), section.name),
                file(collision.second).to_owned(),
            )
        }),
        None => {
            let name = |i: usize| sidebar.section(i).map_or("?", |s| s.name.as_str());
            Some((name(collision.first).to_owned(), name(collision.second).to_owned()))
        }
    };
    let (first, second) = names.unwrap_or_default();
    format!(
        "Slug '{}' is shared by {first} and {second}; {second} is unreachable",
        collision.slug
    )
}

/// Human-readable description of the document location.
fn describe_source(source: &DocsSource) -> String {
    match source {
        DocsSource::Dir(dir) => dir.display().to_string(),
        DocsSource::Url(url) => url.clone(),
    }
}
