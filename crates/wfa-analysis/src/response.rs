//! Raw generation output as received from the model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Single upstream payload: the model text plus its citations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

impl RawResponse {
    /// Response with text and no sources.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.sources = sources;
        self
    }

    /// Sources that carry a web reference, in order.
    pub fn web_sources(&self) -> impl Iterator<Item = &WebSource> {
        self.sources.iter().filter_map(|s| s.web.as_ref())
    }
}

/// Citation record. Only web references are displayed.
///
/// Other chunk kinds (`retrievedContext` and the like) are kept in `other`
/// so a saved response re-serializes without loss.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SourceRef {
    #[must_use]
    pub fn web(uri: impl Into<String>, title: Option<String>) -> Self {
        Self {
            web: Some(WebSource {
                uri: uri.into(),
                title,
            }),
            other: Map::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl WebSource {
    /// Link label: the title when present, otherwise the URI.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.uri,
        }
    }
}
