//! HTML element writers used by the renderer.
//!
//! Everything that turns model-provided text into markup lives here or in
//! [`escape_html`], so the trust decision for the whole document is made in
//! one place.

use std::fmt::Write;

use crate::state::escape_html;

/// URL schemes that can execute script when clicked or loaded.
const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" checked disabled> "#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled> "#);
    }
}

/// Replace URLs with a script-capable scheme by `#`.
///
/// Scheme matching ignores ASCII case, leading whitespace and embedded
/// control characters, which browsers also ignore.
#[must_use]
pub fn sanitize_url(url: &str) -> &str {
    let normalized: String = url
        .trim_start()
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();

    if UNSAFE_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        "#"
    } else {
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("json"), "[bad json\n", &mut out);
        assert_eq!(
            out,
            "<pre><code class=\"language-json\">[bad json\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_escapes_content() {
        let mut out = String::new();
        code_block(None, "<b>&</b>", &mut out);
        assert_eq!(out, "<pre><code>&lt;b&gt;&amp;&lt;/b&gt;</code></pre>");
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        image("map.png", "Process map", "Current state", &mut out);
        assert_eq!(
            out,
            r#"<img src="map.png" title="Current state" alt="Process map">"#
        );
    }

    #[test]
    fn test_sanitize_url_blocks_script_schemes() {
        assert_eq!(sanitize_url("javascript:alert(1)"), "#");
        assert_eq!(sanitize_url("  JavaScript:alert(1)"), "#");
        assert_eq!(sanitize_url("java\tscript:alert(1)"), "#");
        assert_eq!(sanitize_url("data:text/html;base64,AAAA"), "#");
        assert_eq!(sanitize_url("vbscript:msgbox"), "#");
    }

    #[test]
    fn test_sanitize_url_keeps_regular_links() {
        assert_eq!(sanitize_url("https://workato.com"), "https://workato.com");
        assert_eq!(sanitize_url("#section"), "#section");
        assert_eq!(sanitize_url("mailto:ops@example.com"), "mailto:ops@example.com");
    }
}
