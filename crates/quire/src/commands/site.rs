//! Options shared by commands that load a docs site.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use quire_config::{CliSettings, SiteConfig};
use quire_content::FsContentStore;
use quire_route::PageLoader;
use quire_vcs::{GitHistory, HistoryQuery, NoHistory};

use crate::error::CliError;

/// Site location and loading options.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs collection directory (overrides config).
    #[arg(short, long, env = "QUIRE_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Include pages marked `draft: true`.
    #[arg(long)]
    drafts: bool,

    /// Show last-updated dates from git history (overrides config).
    #[arg(long)]
    last_updated: Option<bool>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration and content into a page loader.
    pub(crate) fn load(self) -> Result<PageLoader, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            include_drafts: self.drafts.then_some(true),
            last_updated: self.last_updated,
        };
        let config = Arc::new(SiteConfig::load(
            self.config.as_deref(),
            Some(&cli_settings),
        )?);

        let store = FsContentStore::from_config(&config)?;
        let history = open_history(&config);
        Ok(PageLoader::new(config, Arc::new(store), history)?)
    }
}

/// Git history of the project, or none outside a repository.
fn open_history(config: &SiteConfig) -> Arc<dyn HistoryQuery> {
    match GitHistory::new(&config.project_root) {
        Ok(history) => Arc::new(history),
        Err(e) => {
            tracing::info!(error = %e, "Git history unavailable, last-updated dates disabled");
            Arc::new(NoHistory)
        }
    }
}
