//! Process map section: a disclosure wrapping the rendered graph.
//!
//! The section is always produced for a present diagram source. When the
//! engine fails, the graph area holds an error panel with the source escaped
//! so nothing from the model reaches the page as markup.

use std::fmt::Write;

use wfa_renderer::escape_html;

use crate::consts::{CHEVRON_ICON, ERROR_TITLE, TOGGLE_LABEL};
use crate::engine::{GraphEngine, GraphError};

/// Rendered process map section.
#[derive(Debug)]
pub struct ProcessMap {
    /// HTML of the disclosure section.
    pub html: String,
    /// Engine failure shown in the section, if any.
    pub error: Option<GraphError>,
}

impl ProcessMap {
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.error.is_none()
    }
}

/// Render a diagram source into a process map section.
///
/// Never fails: engine errors are reported inside the section and returned in
/// [`ProcessMap::error`].
pub fn render_process_map(engine: &dyn GraphEngine, source: &str) -> ProcessMap {
    let (body, error) = match engine.render_graph(source) {
        Ok(svg) => (svg, None),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to render process map");
            (error_panel(engine, &err, source), Some(err))
        }
    };

    let mut html = String::with_capacity(body.len() + 512);
    write!(
        html,
        r#"<details class="process-map" open><summary class="process-map-toggle">{CHEVRON_ICON}<span>{TOGGLE_LABEL}</span></summary>"#
    )
    .unwrap();
    let class = if error.is_some() {
        "process-map-graph process-map-failed"
    } else {
        "process-map-graph"
    };
    write!(html, r#"<div class="{class}">{body}</div></details>"#).unwrap();

    ProcessMap { html, error }
}

fn error_panel(engine: &dyn GraphEngine, err: &GraphError, source: &str) -> String {
    let detail = match err {
        GraphError::Rejected(_) => format!(
            "The AI generated invalid {} syntax. Here is the problematic code:",
            engine.language().display_name()
        ),
        GraphError::Unavailable(_) => {
            "The diagram service could not be reached. Here is the diagram source:".to_owned()
        }
    };

    format!(
        r#"<div class="process-map-error" role="alert"><p class="process-map-error-title">{ERROR_TITLE}</p><p class="process-map-error-detail">{detail}</p><pre><code>{}</code></pre></div>"#,
        escape_html(source)
    )
}
