//! Citation list shown under the report.

use std::fmt::Write;

use wfa_renderer::{escape_html, sanitize_url};

use crate::response::SourceRef;

/// Heading of the sources list.
pub const SOURCES_HEADING: &str = "Sources from Google Search";

/// Render the web sources as a link list.
///
/// Returns `None` when no source carries a web reference.
#[must_use]
pub fn render_sources(sources: &[SourceRef]) -> Option<String> {
    let mut web = sources.iter().filter_map(|s| s.web.as_ref()).peekable();
    web.peek()?;

    let mut out = String::new();
    write!(
        out,
        r#"<section class="sources"><h4>{SOURCES_HEADING}</h4><ul>"#
    )
    .unwrap();
    for source in web {
        write!(
            out,
            r#"<li><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></li>"#,
            escape_html(sanitize_url(&source.uri)),
            escape_html(source.label())
        )
        .unwrap();
    }
    out.push_str("</ul></section>");
    Some(out)
}
