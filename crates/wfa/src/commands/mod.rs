//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod examples;
pub(crate) mod render;

use std::io::Write;
use std::path::Path;

use wfa_analysis::{AnalysisDocument, Composer, PulldownEngine};
use wfa_config::Config;
use wfa_diagrams::{DiagramLanguage, KrokiEngine};

pub(crate) use analyze::AnalyzeArgs;
pub(crate) use examples::ExamplesArgs;
pub(crate) use render::RenderArgs;

use crate::error::CliError;
use crate::output::Output;
use crate::page::{page_title, render_page};

/// Build the composer from configuration.
///
/// Without `diagrams.kroki_url` no graph engine is registered and the build
/// fails with a missing-engine error.
pub(crate) fn build_composer(config: &Config) -> Result<Composer, CliError> {
    let render = &config.render;
    let markdown = PulldownEngine::new()
        .with_gfm(render.gfm)
        .with_raw_html(render.raw_html);
    let mut builder = Composer::builder().markdown_engine(markdown);

    let diagrams = &config.diagrams_resolved;
    if let Some(url) = &diagrams.kroki_url {
        let language = DiagramLanguage::parse(&diagrams.language).ok_or_else(|| {
            CliError::Validation(format!(
                "diagrams.language: unsupported diagram language '{}'",
                diagrams.language
            ))
        })?;
        builder = builder.graph_engine(
            KrokiEngine::new(url)
                .with_language(language)
                .with_timeout(diagrams.timeout()),
        );
    }

    Ok(builder.build()?)
}

/// Write the document as an HTML page to `path`, or to stdout.
pub(crate) fn write_page(
    output: &Output,
    document: &AnalysisDocument,
    path: Option<&Path>,
) -> Result<(), CliError> {
    let html = render_page(document, page_title(document));
    match path {
        Some(path) => {
            std::fs::write(path, html)?;
            output.report_written(path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
