//! `wfa analyze` command implementation.

use std::path::PathBuf;

use clap::Args;
use wfa_analysis::{AnalysisDocument, Composer, RawResponse};
use wfa_config::{CliSettings, Config};
use wfa_gemini::{GeminiClient, GenerationService, analysis_prompt, build_prompt};

use super::{build_composer, write_page};
use crate::catalog::Catalog;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the analyze command.
#[derive(Args)]
pub(crate) struct AnalyzeArgs {
    /// File with the workflow description (default: read stdin).
    #[arg(long, conflicts_with = "example")]
    workflow_file: Option<PathBuf>,

    /// Stakeholder involved in the workflow (repeatable).
    #[arg(short, long = "stakeholder", value_name = "NAME")]
    stakeholders: Vec<String>,

    /// Use a built-in example workflow (see `wfa examples`).
    #[arg(long)]
    example: Option<String>,

    /// Write the HTML report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save the raw model response as JSON for `wfa render`.
    #[arg(long)]
    save_response: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover wfa.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kroki server URL for diagram rendering (overrides config).
    #[arg(long)]
    kroki_url: Option<String>,

    /// Gemini model (overrides config).
    #[arg(long)]
    model: Option<String>,

    /// Pass raw HTML in the report through unescaped.
    #[arg(long)]
    raw_html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Workflow text and stakeholders to analyze.
#[derive(Debug, PartialEq, Eq)]
struct WorkflowInput {
    workflow: String,
    stakeholders: Vec<String>,
}

impl AnalyzeArgs {
    /// Execute the analyze command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, configuration is incomplete,
    /// or the generation call fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            kroki_url: self.kroki_url.clone(),
            model: self.model.clone(),
            raw_html: self.raw_html.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let input = self.resolve_input(&output)?;
        let prompt = analysis_prompt(&build_prompt(&input.stakeholders, &input.workflow)?);

        // Fail on a missing engine before spending a model call.
        let composer = build_composer(&config)?;
        let gemini = config.require_gemini()?;
        let client = GeminiClient::new(gemini.api_key)
            .with_model(&gemini.config.model)
            .with_base_url(&gemini.config.base_url)
            .with_google_search(gemini.config.google_search)
            .with_timeout(gemini.config.timeout());

        output.info(&format!("Analyzing workflow with {}...", gemini.config.model));
        let (response, document) = generate_document(&client, &composer, &prompt)?;

        if let Some(path) = &self.save_response {
            std::fs::write(path, serde_json::to_string_pretty(&response)?)?;
            output.info(&format!("Response saved to {}", path.display()));
        }

        output.diagnostics(&document.diagnostics);
        write_page(&output, &document, self.output.as_deref())
    }

    fn resolve_input(&self, output: &Output) -> Result<WorkflowInput, CliError> {
        let mut input = if let Some(name) = &self.example {
            let catalog = Catalog::load()?;
            let example = catalog
                .find(name)
                .ok_or_else(|| CliError::Validation(format!("Unknown example: {name}")))?;
            output.info(&format!("Using example \"{}\"", example.name));
            WorkflowInput {
                workflow: example.workflow.clone(),
                stakeholders: example.stakeholders.clone(),
            }
        } else if let Some(path) = &self.workflow_file {
            WorkflowInput {
                workflow: std::fs::read_to_string(path)?,
                stakeholders: Vec::new(),
            }
        } else {
            WorkflowInput {
                workflow: std::io::read_to_string(std::io::stdin())?,
                stakeholders: Vec::new(),
            }
        };
        input.stakeholders.extend(self.stakeholders.iter().cloned());
        Ok(input)
    }
}

/// Generate a response for `prompt` and render it.
///
/// An empty response text yields an empty document, which is still written.
fn generate_document(
    service: &dyn GenerationService,
    composer: &Composer,
    prompt: &str,
) -> Result<(RawResponse, AnalysisDocument), CliError> {
    let response = service.generate(prompt)?;
    let document = composer.render(&response);
    tracing::info!(
        headings = document.outline.len(),
        diagnostics = document.diagnostics.len(),
        "Rendered analysis"
    );
    Ok((response, document))
}
