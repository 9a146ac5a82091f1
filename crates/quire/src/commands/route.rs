//! `quire route` command implementation.

use clap::Args;

use super::site::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the route command.
#[derive(Args)]
pub(crate) struct RouteArgs {
    /// Request path or URL of the page (e.g. `/guides/intro/`).
    path: String,

    #[command(flatten)]
    pub site: SiteArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl RouteArgs {
    /// Execute the route command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site cannot be loaded or the page's route
    /// data cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loader = self.site.load()?;

        let page = loader.load(&self.path)?;
        if page.not_found {
            output.info(&format!("No page at {}, showing the not-found page", self.path));
        }

        Output::result(&to_json(&page, self.pretty)?)?;
        Ok(())
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
