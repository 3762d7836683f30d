//! docpress CLI - Markdown documentation publisher.
//!
//! Provides commands for:
//! - `html`: Generate a static HTML site from a documentation tree
//! - `upload`: Push the documentation hierarchy to the hosted docs service
//! - `delete-version`: Delete a hosted documentation version

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DeleteVersionArgs, HtmlArgs, UploadArgs};
use output::Output;

/// docpress - Markdown documentation publisher.
#[derive(Parser)]
#[command(name = "docpress", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a static HTML site.
    Html(HtmlArgs),
    /// Push documentation to the hosted docs service.
    Upload(UploadArgs),
    /// Delete a hosted documentation version.
    DeleteVersion(DeleteVersionArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = match &cli.command {
        Commands::Html(args) => args.verbose,
        Commands::Upload(args) => args.verbose,
        Commands::DeleteVersion(_) => false,
    };
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Html(args) => args.execute(&output),
        Commands::Upload(args) => args.execute(&output),
        Commands::DeleteVersion(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
