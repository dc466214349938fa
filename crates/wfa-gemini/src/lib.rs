//! Generation service for workflow analyses.
//!
//! [`GeminiClient`] sends the analysis prompt to the Gemini `generateContent`
//! endpoint, with Google Search grounding, and returns the model text and its
//! citations as a [`RawResponse`](wfa_analysis::RawResponse). No retries are
//! attempted.
//!
//! # Example
//!
//! ```no_run
//! use wfa_gemini::{GeminiClient, GenerationService, analysis_prompt, build_prompt};
//!
//! let input = build_prompt(&["Jenna (Manager)".to_owned()], "Expense reports by email")?;
//! let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?);
//! let _response = client.generate(&analysis_prompt(&input))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod error;
mod prompt;
mod types;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GenerationService, NO_CONTENT_MESSAGE,
};
pub use error::{GenerateError, PromptError};
pub use prompt::{ANALYSIS_TEMPLATE, analysis_prompt, build_prompt, normalize_stakeholders};
