//! Locally recovered failures recorded during a render.

use wfa_diagrams::GraphError;

/// A segment failure that was recovered without aborting the document.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// The JSON block could not be parsed; it stays in the document as code.
    #[error("malformed tool recommendations: {message}")]
    MalformedStructuredBlock { message: String },
    /// The diagram engine failed; an error panel replaced the graph.
    #[error("malformed diagram source: {error}")]
    MalformedDiagramSource { error: GraphError },
}
