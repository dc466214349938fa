//! Markdown to HTML rendering for analysis reports.
//!
//! This crate provides a [`MarkdownRenderer`] that turns GitHub Flavored
//! Markdown into an HTML fragment and collects a heading outline on the way.
//!
//! Model output is untrusted: by default raw HTML is escaped and
//! script-capable link targets are replaced. Anchor lines registered with
//! [`MarkdownRenderer::with_anchor`] survive rendering verbatim so callers can
//! splice their own markup in afterwards.
//!
//! # Example
//!
//! ```
//! use wfa_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render_markdown("## Hello\n\n**Bold** text");
//! assert_eq!(result.headings[0].id, "hello");
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

mod html;
mod renderer;
mod state;
mod util;

pub use html::sanitize_url;
pub use renderer::{MarkdownRenderer, RenderResult, parser_options};
pub use state::{Heading, escape_html, slugify};
