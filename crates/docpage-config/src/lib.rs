//! `docpage.toml` loading.
//!
//! The file is looked up in the working directory and its ancestors unless a
//! path is given. Relative paths in it are relative to the file's directory.
//! Command-line flags arrive as [`CliSettings`] and win over the file.
//!
//! ```toml
//! [server]
//! port = 7979
//!
//! [site]
//! title = "Machine Learning Version Control System"
//! edit_url_base = "https://github.com/iterative/dvc.org/blob/master"
//!
//! [docs]
//! base_url = "${DOCS_URL:-https://dvc.org}"
//!
//! [[sections]]
//! name = "Get Started"
//! folder = "/static/docs/get-started"
//! indexFile = "index.md"
//! files = ["install.md", "tutorial.md"]
//! ```
//!
//! Instead of `[[sections]]` tables, `docs.sidebar` may name a JSON file with
//! the same array.
//!
//! `server.host`, `docs.base_url` and `site.edit_url_base` go through
//! environment expansion: `${VAR}` fails when `VAR` is unset, while
//! `${VAR:-fallback}` falls back.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use docpage_nav::{Easing, ScrollSettings, Sidebar, SidebarError, SidebarSection};
use serde::Deserialize;

const CONFIG_FILENAME: &str = "docpage.toml";

/// Longest accepted scroll animation.
const MAX_SCROLL_MS: u64 = 10_000;

/// Values given on the command line.
///
/// `None` keeps the file's value. `source_dir` and `base_url` exclude each
/// other and either one replaces the configured document source.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub source_dir: Option<PathBuf>,
    pub base_url: Option<String>,
}

/// Loaded configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    /// `[docs]` as written; see `docs_resolved`.
    docs: RawDocs,
    pub scroll: ScrollConfig,
    sections: Vec<SidebarSection>,

    /// `[docs]` with paths joined onto the config directory.
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// File the configuration came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Appears after the section name in page titles.
    pub title: String,
    /// Document paths are appended to this to form "edit" links.
    pub edit_url_base: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            edit_url_base: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawDocs {
    source_dir: Option<String>,
    base_url: Option<String>,
    sidebar: Option<String>,
}

/// Where documents are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsSource {
    /// Section folders are taken relative to this directory.
    Dir(PathBuf),
    /// Section folders are appended to this URL.
    Url(String),
}

#[derive(Debug)]
pub struct DocsConfig {
    pub source: DocsSource,
    /// Sidebar JSON file; `None` when sections are inline.
    pub sidebar: Option<PathBuf>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source: DocsSource::Dir(PathBuf::from(".")),
            sidebar: None,
        }
    }
}

/// `[scroll]` table. Durations are milliseconds, the offset is pixels.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub top_duration_ms: u64,
    pub anchor_duration_ms: u64,
    /// Height of the sticky header kept clear above an anchor.
    pub header_offset: f64,
    pub easing: Easing,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        let defaults = ScrollSettings::default();
        let millis = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            top_duration_ms: millis(defaults.top_duration),
            anchor_duration_ms: millis(defaults.anchor_duration),
            header_offset: defaults.header_offset,
            easing: defaults.easing,
        }
    }
}

impl ScrollConfig {
    #[must_use]
    pub fn settings(&self) -> ScrollSettings {
        ScrollSettings {
            top_duration: Duration::from_millis(self.top_duration_ms),
            anchor_duration: Duration::from_millis(self.anchor_duration_ms),
            header_offset: self.header_offset,
            easing: self.easing,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed docpage.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Malformed sidebar file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
    /// `${VAR}` named an unset variable.
    #[error("Cannot expand {field}: {message}")]
    EnvVar { field: String, message: String },
    #[error("Invalid sidebar: {0}")]
    Sidebar(#[from] SidebarError),
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    match url.split_once("://") {
        Some(("http" | "https", rest)) if !rest.is_empty() => Ok(()),
        _ => Err(invalid(format!("{field} must be an http(s) URL, got '{url}'"))),
    }
}

impl Config {
    /// Load `config_path`, or the nearest `docpage.toml`, or defaults rooted
    /// at the working directory. `cli` is applied last.
    pub fn load(
        config_path: Option<&Path>,
        cli: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_config(),
        };

        let mut config = match file {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default_with_base(&std::env::current_dir().unwrap_or_default()),
        };
        if let Some(cli) = cli {
            config.apply_cli_settings(cli)?;
        }
        Ok(config)
    }

    /// Parse TOML text whose relative paths are relative to `base`.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, cli: &CliSettings) -> Result<(), ConfigError> {
        let source = match (&cli.source_dir, &cli.base_url) {
            (Some(_), Some(_)) => {
                return Err(invalid("--source-dir and --base-url are mutually exclusive"));
            }
            (Some(dir), None) => Some(DocsSource::Dir(dir.clone())),
            (None, Some(url)) => {
                require_http_url(url, "--base-url")?;
                Some(DocsSource::Url(url.clone()))
            }
            (None, None) => None,
        };

        if let Some(host) = &cli.host {
            self.server.host.clone_from(host);
        }
        self.server.port = cli.port.unwrap_or(self.server.port);
        if let Some(source) = source {
            self.docs_resolved.source = source;
        }
        Ok(())
    }

    /// The sidebar, read from `docs.sidebar` or the inline `[[sections]]`.
    ///
    /// Fails with [`ConfigError::Sidebar`] when there are no sections or a
    /// section lists no files.
    pub fn sidebar(&self) -> Result<Sidebar, ConfigError> {
        let sections = if let Some(path) = &self.docs_resolved.sidebar {
            serde_json::from_str(&std::fs::read_to_string(path)?)?
        } else {
            self.sections.clone()
        };
        Ok(Sidebar::new(sections)?)
    }

    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            docs: RawDocs::default(),
            scroll: ScrollConfig::default(),
            sections: Vec::new(),
            docs_resolved: DocsConfig {
                source: DocsSource::Dir(base.to_path_buf()),
                sidebar: None,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let base = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&std::fs::read_to_string(path)?, base)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Check value ranges. [`Config::from_toml`] runs this already.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(invalid("server.port must not be 0"));
        }

        require_non_empty(&self.site.title, "site.title")?;
        if let Some(base) = &self.site.edit_url_base {
            require_http_url(base, "site.edit_url_base")?;
        }

        let offset = self.scroll.header_offset;
        if !offset.is_finite() || offset < 0.0 {
            return Err(invalid(format!(
                "scroll.header_offset must be a non-negative number, got {offset}"
            )));
        }
        for (field, value) in [
            ("scroll.top_duration_ms", self.scroll.top_duration_ms),
            ("scroll.anchor_duration_ms", self.scroll.anchor_duration_ms),
        ] {
            if value > MAX_SCROLL_MS {
                return Err(invalid(format!("{field} must be at most {MAX_SCROLL_MS}")));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        for (value, field) in [
            (&mut self.docs.base_url, "docs.base_url"),
            (&mut self.site.edit_url_base, "site.edit_url_base"),
        ] {
            if let Some(text) = value.as_deref() {
                *value = Some(expand::expand_env(text, field)?);
            }
        }
        Ok(())
    }

    /// Turn `[docs]` into [`DocsConfig`], rejecting conflicting declarations.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let source = match (&self.docs.source_dir, &self.docs.base_url) {
            (Some(_), Some(_)) => {
                return Err(invalid("docs.source_dir and docs.base_url are mutually exclusive"));
            }
            (Some(dir), None) => DocsSource::Dir(config_dir.join(dir)),
            (None, Some(url)) => {
                require_http_url(url, "docs.base_url")?;
                DocsSource::Url(url.clone())
            }
            (None, None) => DocsSource::Dir(config_dir.to_path_buf()),
        };

        if self.docs.sidebar.is_some() && !self.sections.is_empty() {
            return Err(invalid("[[sections]] and docs.sidebar are mutually exclusive"));
        }

        self.docs_resolved = DocsConfig {
            source,
            sidebar: self.docs.sidebar.as_ref().map(|p| config_dir.join(p)),
        };
        Ok(())
    }
}
