//! CLI error types.

use wfa_analysis::ComposeError;
use wfa_config::ConfigError;
use wfa_gemini::{GenerateError, PromptError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Compose(#[from] ComposeError),

    #[error("Failed to generate analysis. {0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Prompt(#[from] PromptError),

    #[error("Invalid response file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid example catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}
