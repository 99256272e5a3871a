//! docpage CLI - Documentation page server.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server
//! - `resolve`: Resolve and load a single page URL
//! - `links`: Check every generated sidebar link

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{LinksArgs, ResolveArgs, ServeArgs};
use output::Output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// docpage - Documentation page server.
#[derive(Parser)]
#[command(name = "docpage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the documentation site over HTTP.
    Serve(ServeArgs),
    /// Resolve a page URL and print what it loads.
    Resolve(ResolveArgs),
    /// Print every sidebar link and check that it resolves back.
    Links(LinksArgs),
}

/// `--verbose` forces info and ignores `RUST_LOG`; otherwise `RUST_LOG`, or
/// warn when it is unset or invalid.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.common.verbose,
        Commands::Resolve(args) => args.common.verbose,
        Commands::Links(args) => args.common.verbose,
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(error::CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Resolve(args) => args.execute(),
        Commands::Links(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbose_filter_is_info() {
        assert_eq!(log_filter(true).to_string(), "info");
    }
}
