//! Placeholder anchors marking where extracted blocks are spliced back in.

use sha2::{Digest, Sha256};

/// Identity of a placeholder slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Tool recommendation cards.
    Roi,
    /// Process map.
    Diagram,
}

impl SlotKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Roi => "roi",
            Self::Diagram => "diagram",
        }
    }
}

/// Anchor token left in the markdown in place of an extracted block.
///
/// The token is a self-contained HTML line. Its id carries a nonce derived
/// from the response text, so the text itself cannot contain a matching token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    kind: SlotKind,
    token: String,
}

impl Placeholder {
    #[must_use]
    pub fn new(kind: SlotKind, nonce: &str) -> Self {
        let name = kind.as_str();
        Self {
            kind,
            token: format!(r#"<div data-wfa-slot="{name}" id="wfa-{name}-{nonce}"></div>"#),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Compute the placeholder nonce for a response text.
///
/// Returns the first 12 hex characters of the SHA-256 digest.
#[must_use]
pub fn compute_nonce(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..6])
}
