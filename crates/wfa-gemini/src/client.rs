//! Gemini REST client.

use std::time::Duration;

use ureq::Agent;
use wfa_analysis::RawResponse;

use crate::error::GenerateError;
use crate::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GoogleSearch,
    RequestPart, Tool,
};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Text returned when the model produced no candidate.
pub const NO_CONTENT_MESSAGE: &str =
    "An error occurred while generating the analysis. No content was returned from the AI.";

/// Produces a raw response for a prompt.
pub trait GenerationService {
    fn generate(&self, prompt: &str) -> Result<RawResponse, GenerateError>;
}

/// Client for the `generateContent` endpoint.
pub struct GeminiClient {
    agent: Agent,
    api_key: String,
    model: String,
    base_url: String,
    google_search: bool,
}

impl GeminiClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            agent: create_agent(Duration::from_secs(120)),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            google_search: true,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL. Trailing slashes are ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Enable or disable the Google Search grounding tool.
    #[must_use]
    pub fn with_google_search(mut self, enabled: bool) -> Self {
        self.google_search = enabled;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        let tools = if self.google_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            tools,
        }
    }
}

impl GenerationService for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<RawResponse, GenerateError> {
        let url = self.endpoint_url();
        tracing::info!(model = %self.model, search = self.google_search, "Requesting analysis");

        let response = self
            .agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .send_json(self.request_body(prompt))?;

        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;

        if status >= 400 {
            return Err(GenerateError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let raw = into_raw_response(parsed);
        tracing::info!(
            chars = raw.text.len(),
            sources = raw.sources.len(),
            "Received analysis"
        );
        Ok(raw)
    }
}

fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Error message from an API error body, or the body itself.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_owned())
}

/// Build the raw response from the first candidate.
fn into_raw_response(response: GenerateContentResponse) -> RawResponse {
    let Some(candidate) = response.candidates.into_iter().next() else {
        tracing::warn!("Gemini returned no candidates");
        return RawResponse::new(NO_CONTENT_MESSAGE);
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    let sources = candidate
        .grounding_metadata
        .map(|metadata| metadata.grounding_chunks)
        .unwrap_or_default();

    RawResponse::new(text).with_sources(sources)
}
