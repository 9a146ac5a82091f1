//! `quire routes` command implementation.

use clap::Args;
use quire_route::Route;

use super::site::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loader = self.site.load()?;
        let routes = loader.routes();

        output.highlight(&format!("{} routes", routes.len()));
        for route in routes {
            let line = format_route(route);
            if route.is_fallback {
                Output::result(&format!("{line} {}", output.dim("(fallback)")))?;
            } else {
                Output::result(&line)?;
            }
        }
        Ok(())
    }
}

/// `/<slug>/  [lang]  <file>` line for a route.
fn format_route(route: &Route) -> String {
    let path = if route.slug.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", route.slug)
    };
    format!("{path:<40} [{}] {}", route.meta.lang, route.entry.file_path)
}
