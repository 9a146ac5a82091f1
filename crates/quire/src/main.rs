//! Quire CLI - documentation route data.
//!
//! Provides commands for:
//! - `route`: Print the route data of one page as JSON
//! - `routes`: List every route of the docs collection

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RouteArgs, RoutesArgs};
use output::Output;

/// Quire - documentation route data.
#[derive(Parser)]
#[command(name = "quire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route data of a page.
    Route(RouteArgs),
    /// List all routes.
    Routes(RoutesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Route(args) => args.site.verbose,
        Commands::Routes(args) => args.site.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Route(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
