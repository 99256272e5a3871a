//! `docpage serve` command implementation.

use clap::Args;
use docpage_config::Config;
use docpage_server::{ServerConfig, run_server};

use super::{CommonArgs, Site, describe_collision, describe_source};
use crate::error::CliError;
use crate::output::Output;

/// `docpage serve` arguments.
#[derive(Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Listen address, instead of `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Listen port, instead of `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Print the site summary and run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Fails when the configuration or sidebar is invalid or the address cannot be bound.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(self.host, self.port)?;
        let site = Site::from_config(&config)?;

        output.title(&format!(
            "Starting server on http://{}:{}/doc",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Documents: {}",
            describe_source(&config.docs_resolved.source)
        ));
        output.info(&format!("Sections: {}", site.sidebar.len()));
        for collision in site.sidebar.collisions() {
            output.warning(&describe_collision(&site.sidebar, &collision));
        }

        run_server(
            server_config(&config, site.info, version),
            site.sidebar,
            site.source,
        )
        .await?;

        Ok(())
    }
}

/// Build the server configuration.
fn server_config(config: &Config, site: docpage_site::SiteInfo, version: &str) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site,
        scroll: config.scroll.settings(),
        version: version.to_owned(),
    }
}
