//! Composer: runs extraction, markdown rendering and the slot renderers.

use std::fmt;

use wfa_diagrams::{GraphEngine, render_process_map};
use wfa_renderer::Heading;

use crate::anchor::SlotKind;
use crate::cards::render_tool_cards;
use crate::diagnostic::Diagnostic;
use crate::engine::MarkdownEngine;
use crate::extract::Extractor;
use crate::response::RawResponse;
use crate::sources::render_sources;

/// Which rendering engine is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineKind {
    Markdown,
    Graph,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => f.write_str("markdown"),
            Self::Graph => f.write_str("graph"),
        }
    }
}

/// Error building a [`Composer`].
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("A required {0} rendering engine is not available")]
    MissingRenderingEngine(EngineKind),
}

/// A fully rendered analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisDocument {
    /// Report body with cards and process map spliced in.
    pub body: String,
    /// Sources list, `None` when the response has no web sources.
    pub sources: Option<String>,
    /// Report headings in document order.
    pub outline: Vec<Heading>,
    /// Segment failures recovered during rendering.
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisDocument {
    /// Whether there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Builder for [`Composer`].
#[derive(Default)]
pub struct ComposerBuilder {
    markdown: Option<Box<dyn MarkdownEngine>>,
    graph: Option<Box<dyn GraphEngine>>,
}

impl ComposerBuilder {
    #[must_use]
    pub fn markdown_engine(mut self, engine: impl MarkdownEngine + 'static) -> Self {
        self.markdown = Some(Box::new(engine));
        self
    }

    #[must_use]
    pub fn graph_engine(mut self, engine: impl GraphEngine + 'static) -> Self {
        self.graph = Some(Box::new(engine));
        self
    }

    /// Build the composer.
    ///
    /// Both engines are required.
    pub fn build(self) -> Result<Composer, ComposeError> {
        let markdown = self
            .markdown
            .ok_or(ComposeError::MissingRenderingEngine(EngineKind::Markdown))?;
        let graph = self
            .graph
            .ok_or(ComposeError::MissingRenderingEngine(EngineKind::Graph))?;
        let extractor = Extractor::new(graph.language()).with_gfm(markdown.gfm());

        Ok(Composer {
            markdown,
            graph,
            extractor,
        })
    }
}

/// Renders raw responses into displayable documents.
///
/// Holds no per-render state, so one composer can render any number of
/// responses, from several threads if needed.
pub struct Composer {
    markdown: Box<dyn MarkdownEngine>,
    graph: Box<dyn GraphEngine>,
    extractor: Extractor,
}

impl Composer {
    #[must_use]
    pub fn builder() -> ComposerBuilder {
        ComposerBuilder::default()
    }

    /// Render a response.
    ///
    /// Empty text yields an empty document. Segment failures are recovered
    /// in place and reported in [`AnalysisDocument::diagnostics`].
    pub fn render(&self, response: &RawResponse) -> AnalysisDocument {
        if response.text.is_empty() {
            return AnalysisDocument::default();
        }

        let extraction = self.extractor.extract(&response.text);
        let anchors: Vec<&str> = extraction
            .placeholders
            .iter()
            .map(|p| p.token())
            .collect();

        let rendered = self.markdown.render_markdown(&extraction.residual, &anchors);
        let mut body = rendered.html;
        let mut diagnostics = extraction.diagnostics;

        for placeholder in &extraction.placeholders {
            let fragment = match placeholder.kind() {
                SlotKind::Roi => extraction
                    .tool_set
                    .as_deref()
                    .map(render_tool_cards)
                    .unwrap_or_default(),
                SlotKind::Diagram => match extraction.diagram_source.as_deref() {
                    Some(source) => {
                        let map = render_process_map(self.graph.as_ref(), source);
                        if let Some(error) = map.error {
                            diagnostics.push(Diagnostic::MalformedDiagramSource { error });
                        }
                        map.html
                    }
                    None => String::new(),
                },
            };

            if body.contains(placeholder.token()) {
                body = body.replacen(placeholder.token(), &fragment, 1);
            } else {
                tracing::warn!(
                    slot = placeholder.kind().as_str(),
                    "Placeholder not found in rendered markdown"
                );
            }
        }

        AnalysisDocument {
            body,
            sources: render_sources(&response.sources),
            outline: rendered.headings,
            diagnostics,
        }
    }
}
