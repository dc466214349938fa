//! Process map rendering for workflow analysis reports.
//!
//! This crate turns the diagram source found in a model response into an
//! HTML section:
//! - [`GraphEngine`] abstracts the service that renders diagram text to SVG
//! - [`KrokiEngine`] implements it over HTTP against a Kroki server
//! - [`render_process_map`] wraps the result in a collapsible section, or an
//!   error panel with the escaped source when rendering fails
//!
//! # Example
//!
//! ```no_run
//! use wfa_diagrams::{KrokiEngine, render_process_map};
//!
//! let engine = KrokiEngine::new("https://kroki.io");
//! let map = render_process_map(&engine, "graph TD\nA-->B");
//! println!("{}", map.html);
//! ```

mod consts;
mod engine;
mod kroki;
mod language;
mod process_map;
mod svg;

pub use consts::DEFAULT_TIMEOUT;
pub use engine::{GraphEngine, GraphError};
pub use kroki::{KrokiEngine, create_agent};
pub use language::DiagramLanguage;
pub use process_map::{ProcessMap, render_process_map};
pub use svg::prepare_inline_svg;
