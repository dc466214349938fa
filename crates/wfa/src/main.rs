//! WFA CLI - Workflow analyzer.
//!
//! Provides commands for:
//! - `analyze`: Generate an analysis for a workflow description and render it
//! - `render`: Render a saved model response to HTML
//! - `examples`: List the built-in example workflows

mod catalog;
mod commands;
mod error;
mod output;
mod page;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AnalyzeArgs, ExamplesArgs, RenderArgs};
use output::Output;

/// WFA - Workflow analyzer.
#[derive(Parser)]
#[command(name = "wfa", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a workflow description and write an HTML report.
    Analyze(AnalyzeArgs),
    /// Render a saved model response to an HTML report.
    Render(RenderArgs),
    /// List the built-in example workflows.
    Examples(ExamplesArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Analyze(args) => args.verbose,
            Self::Render(args) => args.verbose,
            Self::Examples(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Analyze(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Examples(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
