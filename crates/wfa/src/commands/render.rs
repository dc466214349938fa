//! `wfa render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use wfa_analysis::RawResponse;
use wfa_config::{CliSettings, Config};

use super::{build_composer, write_page};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Saved response: a `.json` file from `--save-response`, or raw model text.
    response: PathBuf,

    /// Write the HTML report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover wfa.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kroki server URL for diagram rendering (overrides config).
    #[arg(long)]
    kroki_url: Option<String>,

    /// Pass raw HTML in the report through unescaped.
    #[arg(long)]
    raw_html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            kroki_url: self.kroki_url.clone(),
            raw_html: self.raw_html.then_some(true),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let composer = build_composer(&config)?;

        let response = load_response(&self.response)?;
        output.info(&format!("Rendering {}...", self.response.display()));

        let document = composer.render(&response);
        if document.is_empty() {
            output.warning("Response is empty, nothing to render");
        }
        output.diagnostics(&document.diagnostics);
        write_page(&output, &document, self.output.as_deref())
    }
}

/// Read a saved response.
///
/// Files with a `.json` extension hold a serialized [`RawResponse`]; anything
/// else is taken as raw model text without sources.
fn load_response(path: &Path) -> Result<RawResponse, CliError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(RawResponse::new(content))
    }
}
