//! Preparation of engine SVG output for inline embedding.

use std::sync::LazyLock;

use regex::Regex;

/// XML declaration and doctype, invalid inside an HTML document body.
static PROLOG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*(?:<\?xml.*?\?>\s*)?(?:<!DOCTYPE[^>]*>\s*)?").unwrap());

static GOOGLE_FONTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@import\s+url\([^)]*fonts\.googleapis\.com[^)]*\)\s*;?").unwrap()
});

/// Strip the XML prolog and remote font imports from an SVG document.
///
/// Mermaid SVGs from Kroki import Google Fonts, which would make the saved
/// report fetch remote resources when opened.
#[must_use]
pub fn prepare_inline_svg(svg: &str) -> String {
    let without_prolog = PROLOG_RE.replace(svg, "");
    GOOGLE_FONTS_RE
        .replace_all(&without_prolog, "")
        .trim_end()
        .to_owned()
}
