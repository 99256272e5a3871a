//! `docpage links` command implementation.

use clap::Args;
use docpage_nav::{Location, Resolution, Sidebar, resolve};

use super::{CommonArgs, Site, describe_collision};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// A generated link and whether it resolves back to its entry.
#[derive(Debug, PartialEq, Eq)]
struct LinkCheck {
    href: String,
    expected: Resolution,
    actual: Resolution,
}

impl LinkCheck {
    fn is_ok(&self) -> bool {
        self.expected == self.actual
    }
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if any generated link resolves to a different entry.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(None, None)?;
        let site = Site::from_config(&config)?;

        for collision in site.sidebar.collisions() {
            output.warning(&describe_collision(&site.sidebar, &collision));
        }

        let checks = check_links(&site.sidebar);
        let mut failures = 0;
        for check in &checks {
            if check.is_ok() {
                output.info(&check.href);
            } else {
                failures += 1;
                output.error(&format!(
                    "{} resolves to {:?}, expected {:?}",
                    check.href, check.actual, check.expected
                ));
            }
        }

        if failures > 0 {
            return Err(CliError::Links(failures));
        }
        output.success(&format!("{} links resolve", checks.len()));
        Ok(())
    }
}

/// Resolve every section and file link generated from the sidebar.
fn check_links(sidebar: &Sidebar) -> Vec<LinkCheck> {
    let mut checks = Vec::new();
    for (index, section) in sidebar.sections().iter().enumerate() {
        let targets = std::iter::once((None, Resolution::Section { section: index })).chain(
            section.files.iter().map(|file| {
                (
                    Some(file.as_str()),
                    Resolution::File {
                        section: index,
                        file: file.clone(),
                    },
                )
            }),
        );

        for (file, expected) in targets {
            let Some(href) = sidebar.link_href(index, file) else {
                continue;
            };
            let actual = resolve(sidebar, &Location::new(href.as_str()));
            checks.push(LinkCheck {
                href,
                expected,
                actual,
            });
        }
    }
    checks
}
