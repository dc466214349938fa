//! Kroki-backed graph engine.
//!
//! Diagrams are sent as `text/plain` to `POST {server_url}/{endpoint}/svg`.
//! A 4xx status means Kroki could not parse the source; network errors and
//! 5xx statuses mean the service itself is unavailable.

use std::time::Duration;

use ureq::Agent;

use crate::consts::DEFAULT_TIMEOUT;
use crate::engine::{GraphEngine, GraphError};
use crate::language::DiagramLanguage;
use crate::svg::prepare_inline_svg;

/// Create HTTP agent with the specified timeout.
///
/// Status codes are not turned into errors so the response body can be read
/// for error details.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Graph engine rendering through a Kroki server.
pub struct KrokiEngine {
    agent: Agent,
    server_url: String,
    language: DiagramLanguage,
}

impl KrokiEngine {
    /// Create an engine for the given Kroki server URL.
    ///
    /// Trailing slashes on the URL are ignored.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            server_url: server_url.trim_end_matches('/').to_owned(),
            language: DiagramLanguage::default(),
        }
    }

    /// Set the diagram language sent to Kroki.
    #[must_use]
    pub fn with_language(mut self, language: DiagramLanguage) -> Self {
        self.language = language;
        self
    }

    /// Set the HTTP timeout for render requests.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    /// Full endpoint URL for SVG rendering.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}/svg",
            self.server_url,
            self.language.kroki_endpoint()
        )
    }
}

impl GraphEngine for KrokiEngine {
    fn render_graph(&self, source: &str) -> Result<String, GraphError> {
        let url = self.endpoint_url();
        tracing::debug!(url = %url, bytes = source.len(), "Rendering diagram via Kroki");

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/plain")
            .send(source.as_bytes())
            .map_err(|e| GraphError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();
        let text = if status >= 400 {
            body.read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"))
        } else {
            body.read_to_string()
                .map_err(|e| GraphError::Unavailable(e.to_string()))?
        };

        classify_response(status, &text)
    }

    fn language(&self) -> DiagramLanguage {
        self.language
    }
}

/// Turn a Kroki response into inline SVG or a graph error.
fn classify_response(status: u16, body: &str) -> Result<String, GraphError> {
    if status >= 400 {
        return Err(status_error(status, body.trim()));
    }
    if !body.contains("<svg") {
        return Err(GraphError::Unavailable(
            "response is not an SVG document".to_owned(),
        ));
    }
    Ok(prepare_inline_svg(body))
}

/// Classify an HTTP error status from Kroki.
fn status_error(status: u16, body: &str) -> GraphError {
    let message = format!("HTTP {status}: {body}");
    if (400..500).contains(&status) {
        GraphError::Rejected(message)
    } else {
        GraphError::Unavailable(message)
    }
}
