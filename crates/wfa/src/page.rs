//! Standalone HTML page around a rendered analysis.

use std::fmt::Write;

use wfa_analysis::{AnalysisDocument, STYLESHEET};
use wfa_renderer::escape_html;

/// Page title used when the caller has none.
pub(crate) const DEFAULT_TITLE: &str = "Workflow Analysis";

/// Wrap a document in a self-contained HTML page.
///
/// The page carries the stylesheet inline, so it can be opened straight from
/// disk. The sources list follows the report body when present.
pub(crate) fn render_page(document: &AnalysisDocument, title: &str) -> String {
    let mut out = String::with_capacity(STYLESHEET.len() + document.body.len() + 512);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
    writeln!(out, "<style>{STYLESHEET}</style>").unwrap();
    out.push_str("</head>\n<body>\n<main class=\"analysis\">\n");
    out.push_str(&document.body);
    if let Some(sources) = &document.sources {
        out.push('\n');
        out.push_str(sources);
    }
    out.push_str("\n</main>\n</body>\n</html>\n");

    out
}

/// Page title for a document: its first top-level heading, if any.
pub(crate) fn page_title(document: &AnalysisDocument) -> &str {
    document
        .outline
        .iter()
        .min_by_key(|h| h.level)
        .map_or(DEFAULT_TITLE, |h| h.title.as_str())
}
