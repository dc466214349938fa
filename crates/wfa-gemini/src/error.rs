//! Error types for generation requests.

/// Error generating an analysis.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("Error interacting with Gemini API: {0}")]
    Http(#[from] ureq::Error),
    /// The API answered with an error status.
    #[error("Error interacting with Gemini API: HTTP {status}: {message}")]
    Api { status: u16, message: String },
    /// The response body was not the expected JSON.
    #[error("Error interacting with Gemini API: invalid response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error assembling a prompt from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("Please enter a workflow description.")]
    EmptyWorkflow,
}
