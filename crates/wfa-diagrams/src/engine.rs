//! Graph rendering engine abstraction.

use crate::language::DiagramLanguage;

/// Graph rendering failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The engine refused the diagram source (syntax error, unsupported construct).
    #[error("diagram rejected: {0}")]
    Rejected(String),
    /// The engine could not be reached or returned an unusable response.
    #[error("diagram engine unavailable: {0}")]
    Unavailable(String),
}

/// Renders diagram source text to an SVG document.
///
/// Implementations must be usable from several threads; the composer holds
/// its engine behind a shared reference.
pub trait GraphEngine: Send + Sync {
    /// Render `source` to SVG markup.
    fn render_graph(&self, source: &str) -> Result<String, GraphError>;

    /// Language this engine renders.
    fn language(&self) -> DiagramLanguage {
        DiagramLanguage::Mermaid
    }
}
