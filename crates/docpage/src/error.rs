//! CLI error types.

use docpage_config::ConfigError;
use docpage_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("No sidebar entry for {0}")]
    NotFound(String),

    #[error("Failed to load {url}: {message}")]
    LoadFailed { url: String, message: String },

    #[error("{0} generated link(s) do not resolve back to their entry")]
    Links(usize),
}
