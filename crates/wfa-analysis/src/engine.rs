//! Markdown rendering engine abstraction.

use wfa_renderer::{MarkdownRenderer, RenderResult};

/// Turns residual markdown into an HTML fragment.
///
/// `anchors` are placeholder lines that must appear verbatim in the output.
pub trait MarkdownEngine: Send + Sync {
    fn render_markdown(&self, markdown: &str, anchors: &[&str]) -> RenderResult;

    /// Whether GFM extensions are enabled; extraction tokenizes the same way.
    fn gfm(&self) -> bool {
        true
    }
}

/// Engine backed by [`MarkdownRenderer`].
#[derive(Clone, Copy, Debug)]
pub struct PulldownEngine {
    gfm: bool,
    raw_html: bool,
}

impl PulldownEngine {
    /// GFM enabled, raw HTML escaped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            raw_html: false,
        }
    }

    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    #[must_use]
    pub fn with_raw_html(mut self, enabled: bool) -> Self {
        self.raw_html = enabled;
        self
    }
}

impl Default for PulldownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownEngine for PulldownEngine {
    fn render_markdown(&self, markdown: &str, anchors: &[&str]) -> RenderResult {
        let mut renderer = anchors.iter().fold(
            MarkdownRenderer::new()
                .with_gfm(self.gfm)
                .with_raw_html(self.raw_html),
            |renderer, anchor| renderer.with_anchor(*anchor),
        );
        renderer.render_markdown(markdown)
    }

    fn gfm(&self) -> bool {
        self.gfm
    }
}
