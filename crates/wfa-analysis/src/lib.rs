//! Extraction and composition of workflow analysis reports.
//!
//! A model response is one text blob holding a markdown report, a fenced JSON
//! array of tool recommendations and a fenced diagram. This crate separates
//! the three and renders each with its own strategy:
//!
//! - [`Extractor`] finds the first JSON block and the first diagram block in
//!   the original text and leaves placeholder lines in their place
//! - a [`MarkdownEngine`] renders the residual markdown, keeping placeholders
//! - [`render_tool_cards`] and [`wfa_diagrams::render_process_map`] produce
//!   the fragments spliced back at the placeholders
//!
//! [`Composer`] runs the whole pipeline. A malformed JSON block stays in the
//! report as code; a diagram the engine cannot render becomes an error panel.
//! Neither affects the rest of the document.
//!
//! # Example
//!
//! ```no_run
//! use wfa_analysis::{Composer, PulldownEngine, RawResponse};
//! use wfa_diagrams::KrokiEngine;
//!
//! let composer = Composer::builder()
//!     .markdown_engine(PulldownEngine::new())
//!     .graph_engine(KrokiEngine::new("https://kroki.io"))
//!     .build()?;
//! let document = composer.render(&RawResponse::new("## Summary\n\nDone."));
//! assert!(document.body.contains("Summary"));
//! # Ok::<(), wfa_analysis::ComposeError>(())
//! ```

mod anchor;
mod cards;
mod compose;
mod diagnostic;
mod engine;
mod extract;
mod response;
mod sources;
mod style;
mod tools;

pub use anchor::{Placeholder, SlotKind, compute_nonce};
pub use cards::render_tool_cards;
pub use compose::{AnalysisDocument, ComposeError, Composer, ComposerBuilder, EngineKind};
pub use diagnostic::Diagnostic;
pub use engine::{MarkdownEngine, PulldownEngine};
pub use extract::{Extraction, Extractor};
pub use response::{RawResponse, SourceRef, WebSource};
pub use sources::{SOURCES_HEADING, render_sources};
pub use style::STYLESHEET;
pub use tools::{ToolRecommendation, ToolSetError, parse_tool_set};
