//! `docpage resolve` command implementation.

use clap::Args;
use docpage_nav::{Location, MemoryHistory, PageStatus, Resolution, Sidebar, resolve};
use docpage_site::{DocumentationPage, StaticViewport};

use super::{CommonArgs, Site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Page URL or path, e.g. `/doc/command-reference/add#options`.
    url: String,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names no sidebar entry or the document
    /// can't be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(None, None)?;
        let site = Site::from_config(&config)?;

        let location = Location::parse(&self.url);
        let resolution = resolve(&site.sidebar, &location);
        output.field("Resolution", &describe(&resolution, &site.sidebar));

        let mut page = DocumentationPage::new(
            std::sync::Arc::clone(&site.sidebar),
            std::sync::Arc::clone(&site.source),
            MemoryHistory::new(&self.url),
            StaticViewport::new(),
            config.scroll.settings(),
        );
        page.mount();
        page.pump();

        let state = page.state();
        match &state.status {
            PageStatus::Ready => {
                let view = page.view(&site.info);
                output.field("Title", &view.title);
                if let (Some(section), Some(file)) =
                    (site.sidebar.section(state.current_section), &state.current_file)
                {
                    output.field("Section", &section.name);
                    output.field("File", file);
                    output.field("Document", &site.source.describe(&section.folder, file));
                }
                if state.headings.is_empty() {
                    output.info("No table of contents");
                } else {
                    output.title("Table of contents");
                    for heading in &state.headings {
                        output.toc_entry(&heading.label, &heading.slug);
                    }
                }
                if let Some(fragment) = &state.fragment {
                    let known = state.headings.iter().any(|h| &h.slug == fragment);
                    if !known {
                        output.warning(&format!("Fragment #{fragment} matches no heading"));
                    }
                }
                output.success("OK");
                Ok(())
            }
            PageStatus::LoadFailed(message) => Err(CliError::LoadFailed {
                url: self.url,
                message: message.clone(),
            }),
            PageStatus::NotFound | PageStatus::Idle | PageStatus::Loading => {
                Err(CliError::NotFound(self.url))
            }
        }
    }
}

/// One-line description of a resolution.
fn describe(resolution: &Resolution, sidebar: &Sidebar) -> String {
    let name = |index: usize| sidebar.section(index).map_or("?", |s| s.name.as_str());
    match resolution {
        Resolution::File { section, file } => format!("file {file} in {}", name(*section)),
        Resolution::Section { section } => format!("default file of {}", name(*section)),
        Resolution::Default => "default file of the first section".to_owned(),
        Resolution::NotFound { segment } => format!("not found ({segment})"),
    }
}
