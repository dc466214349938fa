//! Segment extraction: separates the JSON and diagram blocks from the prose.
//!
//! Both blocks are located in the original text with pulldown-cmark's offset
//! iterator, so only real fenced code blocks count. The residual markdown is
//! assembled in a single pass over the original text, with a placeholder line
//! at the position of every extracted block.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use wfa_diagrams::DiagramLanguage;
use wfa_renderer::parser_options;

use crate::anchor::{Placeholder, SlotKind, compute_nonce};
use crate::diagnostic::Diagnostic;
use crate::tools::{ToolRecommendation, parse_tool_set};

/// Result of splitting a response text into its segments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Markdown with extracted blocks replaced by placeholder lines.
    pub residual: String,
    /// Parsed tool recommendations, `None` when absent or malformed.
    pub tool_set: Option<Vec<ToolRecommendation>>,
    /// Diagram source text, verbatim.
    pub diagram_source: Option<String>,
    /// Placeholders present in the residual, in document order.
    pub placeholders: Vec<Placeholder>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// Placeholder of the given kind, if one was inserted.
    #[must_use]
    pub fn placeholder(&self, kind: SlotKind) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.kind() == kind)
    }
}

/// Locates the first JSON block and the first diagram block of a text.
#[derive(Clone, Copy, Debug)]
pub struct Extractor {
    language: DiagramLanguage,
    gfm: bool,
}

/// A fenced code block found in the original text.
struct Fence {
    kind: Option<SlotKind>,
    range: Range<usize>,
    content: String,
}

impl Extractor {
    /// Create an extractor for diagram blocks in the given language.
    #[must_use]
    pub fn new(language: DiagramLanguage) -> Self {
        Self {
            language,
            gfm: true,
        }
    }

    /// Tokenize with or without GFM extensions (must match the renderer).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Split `text` into residual markdown, tool set and diagram source.
    pub fn extract(&self, text: &str) -> Extraction {
        let mut extraction = Extraction::default();
        if text.is_empty() {
            return extraction;
        }

        let mut json_fence = None;
        let mut diagram_fence = None;

        for fence in self.fences(text) {
            match fence.kind {
                Some(SlotKind::Roi) if json_fence.is_none() => json_fence = Some(fence),
                Some(SlotKind::Diagram) if diagram_fence.is_none() => diagram_fence = Some(fence),
                _ => {}
            }
            if json_fence.is_some() && diagram_fence.is_some() {
                break;
            }
        }

        let mut cuts: Vec<(Range<usize>, SlotKind)> = Vec::with_capacity(2);

        if let Some(fence) = json_fence {
            match parse_tool_set(&fence.content) {
                Ok(tools) => {
                    tracing::debug!(count = tools.len(), "Extracted tool recommendations");
                    extraction.tool_set = Some(tools);
                    cuts.push((fence.range, SlotKind::Roi));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse tool recommendations");
                    extraction
                        .diagnostics
                        .push(Diagnostic::MalformedStructuredBlock {
                            message: e.to_string(),
                        });
                }
            }
        }

        if let Some(fence) = diagram_fence {
            extraction.diagram_source = Some(fence.content);
            cuts.push((fence.range, SlotKind::Diagram));
        }

        if cuts.is_empty() {
            extraction.residual = text.to_owned();
            return extraction;
        }

        cuts.sort_by_key(|(range, _)| range.start);
        let nonce = compute_nonce(text);
        let mut residual = String::with_capacity(text.len() + cuts.len() * 64);
        let mut cursor = 0;

        for (range, kind) in cuts {
            let placeholder = Placeholder::new(kind, &nonce);
            let line_start = text[..range.start].rfind('\n').map_or(0, |i| i + 1);
            // Container markers or indentation before the fence on its line.
            let prefix = &text[line_start..range.start];

            residual.push_str(&text[cursor..range.start]);
            if prefix.is_empty() && !residual.is_empty() && !residual.ends_with('\n') {
                residual.push('\n');
            }
            residual.push_str(placeholder.token());
            residual.push('\n');

            cursor = range.end;
            if !text[..cursor].ends_with('\n') && text[cursor..].starts_with('\n') {
                cursor += 1;
            }
            // Blank line inside the same container so following markdown does
            // not join the HTML block.
            if !text[cursor..].lines().next().is_some_and(is_blank_line) {
                residual.push_str(continuation(prefix).trim_end());
                residual.push('\n');
            }
            extraction.placeholders.push(placeholder);
        }
        residual.push_str(&text[cursor..]);

        extraction.residual = residual;
        extraction
    }

    /// Fenced code blocks of `text` with their kind and source range.
    fn fences(&self, text: &str) -> Vec<Fence> {
        let mut fences = Vec::new();
        let mut open: Option<Fence> = None;

        for (event, range) in Parser::new_ext(text, parser_options(self.gfm)).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    open = Some(Fence {
                        kind: self.classify(&info),
                        range,
                        content: String::new(),
                    });
                }
                Event::Text(content) => {
                    if let Some(fence) = open.as_mut() {
                        fence.content.push_str(&content);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(fence) = open.take() {
                        fences.push(fence);
                    }
                }
                _ => {}
            }
        }

        fences
    }

    fn classify(&self, info: &str) -> Option<SlotKind> {
        let lang = info.split_whitespace().next()?;
        if lang.eq_ignore_ascii_case("json") {
            Some(SlotKind::Roi)
        } else if self.language.matches_fence(lang) {
            Some(SlotKind::Diagram)
        } else {
            None
        }
    }
}

/// Line prefix that continues the containers of `prefix` on a later line.
///
/// Blockquote markers are kept; list markers become indentation.
fn continuation(prefix: &str) -> String {
    prefix
        .chars()
        .map(|c| if c == '>' || c.is_whitespace() { c } else { ' ' })
        .collect()
}

/// Whether a line is blank once blockquote markers are removed.
fn is_blank_line(line: &str) -> bool {
    line.chars().all(|c| c == '>' || c.is_whitespace())
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DiagramLanguage::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Extraction {
        Extractor::default().extract(text)
    }

    fn token(kind: SlotKind, text: &str) -> String {
        Placeholder::new(kind, &compute_nonce(text)).token().to_owned()
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract(""), Extraction::default());
    }

    #[test]
    fn test_no_fences_leaves_text_unchanged() {
        let text = "## Summary\n\nSome prose.\n\n```python\nprint(1)\n```\n";
        let extraction = extract(text);
        assert_eq!(extraction.residual, text);
        assert_eq!(extraction.tool_set, None);
        assert_eq!(extraction.diagram_source, None);
        assert!(extraction.placeholders.is_empty());
    }

    #[test]
    fn test_extracts_json_and_diagram() {
        let text = "## A\n```mermaid\ngraph TD\nX-->Y\n```\n## B\n```json\n[{\"tool\": \"X\"}]\n```\n## C";
        let extraction = extract(text);

        assert_eq!(extraction.diagram_source.as_deref(), Some("graph TD\nX-->Y\n"));
        assert_eq!(extraction.tool_set.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            extraction.residual,
            format!(
                "## A\n{}\n\n## B\n{}\n\n## C",
                token(SlotKind::Diagram, text),
                token(SlotKind::Roi, text)
            )
        );
        let kinds: Vec<_> = extraction.placeholders.iter().map(Placeholder::kind).collect();
        assert_eq!(kinds, [SlotKind::Diagram, SlotKind::Roi]);
    }

    #[test]
    fn test_invalid_json_left_in_place() {
        let text = "## A\n```json\n[bad json\n```\n## B";
        let extraction = extract(text);

        assert_eq!(extraction.residual, text);
        assert_eq!(extraction.tool_set, None);
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(matches!(
            extraction.diagnostics[0],
            Diagnostic::MalformedStructuredBlock { .. }
        ));
    }

    #[test]
    fn test_invalid_json_does_not_block_diagram() {
        let text = "```json\n{oops\n```\n\n```mermaid\ngraph LR\n```\n";
        let extraction = extract(text);

        assert_eq!(extraction.tool_set, None);
        assert_eq!(extraction.diagram_source.as_deref(), Some("graph LR\n"));
        assert!(extraction.residual.starts_with("```json\n{oops\n```\n\n"));
        assert!(extraction.residual.contains(&token(SlotKind::Diagram, text)));
    }

    #[test]
    fn test_only_first_block_of_each_kind() {
        let text = "```json\n[]\n```\n\n```json\n[{\"tool\": \"second\"}]\n```\n";
        let extraction = extract(text);

        assert_eq!(extraction.tool_set, Some(Vec::new()));
        assert!(extraction.residual.contains("```json\n[{\"tool\": \"second\"}]\n```"));
        assert_eq!(extraction.placeholders.len(), 1);
    }

    #[test]
    fn test_first_json_block_malformed_second_ignored() {
        let text = "```json\nnope\n```\n\n```json\n[]\n```\n";
        let extraction = extract(text);

        assert_eq!(extraction.tool_set, None);
        assert_eq!(extraction.residual, text);
    }

    #[test]
    fn test_json_info_string_case_insensitive() {
        let extraction = extract("```JSON\n[]\n```\n");
        assert_eq!(extraction.tool_set, Some(Vec::new()));
    }

    #[test]
    fn test_fence_inside_code_block_ignored() {
        let text = "````markdown\n```json\n[]\n```\n````\n";
        let extraction = extract(text);
        assert_eq!(extraction.tool_set, None);
        assert_eq!(extraction.residual, text);
    }

    #[test]
    fn test_kroki_prefixed_diagram() {
        let extraction = extract("```kroki-mermaid\ngraph TD\n```\n");
        assert_eq!(extraction.diagram_source.as_deref(), Some("graph TD\n"));
    }

    #[test]
    fn test_configured_language() {
        let extractor = Extractor::new(DiagramLanguage::GraphViz);
        let extraction =
            extractor.extract("```mermaid\ngraph TD\n```\n\n```dot\ndigraph { a -> b }\n```\n");
        assert_eq!(
            extraction.diagram_source.as_deref(),
            Some("digraph { a -> b }\n")
        );
        assert!(extraction.residual.starts_with("```mermaid\n"));
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let text = "## A\n```mermaid\ngraph TD\nA-->B";
        let extraction = extract(text);
        let source = extraction.diagram_source.as_deref().unwrap();
        assert_eq!(source.trim_end(), "graph TD\nA-->B");
        assert_eq!(
            extraction.residual,
            format!("## A\n{}\n\n", token(SlotKind::Diagram, text))
        );
    }

    #[test]
    fn test_placeholder_after_paragraph_gets_own_line() {
        let text = "Intro text\n```json\n[]\n```\nAfter";
        let extraction = extract(text);
        assert_eq!(
            extraction.residual,
            format!("Intro text\n{}\n\nAfter", token(SlotKind::Roi, text))
        );
    }

    #[test]
    fn test_placeholder_stays_in_list_item() {
        let text = "1. Step\n   ```json\n   []\n   ```\n2. Two";
        let extraction = extract(text);
        assert_eq!(extraction.tool_set, Some(Vec::new()));
        assert_eq!(
            extraction.residual,
            format!("1. Step\n   {}\n\n2. Two", token(SlotKind::Roi, text))
        );
    }

    #[test]
    fn test_placeholder_stays_in_blockquote() {
        let text = "> Note\n> ```json\n> []\n> ```\n> End\n";
        let extraction = extract(text);
        assert_eq!(
            extraction.residual,
            format!("> Note\n> {}\n>\n> End\n", token(SlotKind::Roi, text))
        );
    }

    #[test]
    fn test_continuation_prefix() {
        assert_eq!(continuation("1. "), "   ");
        assert_eq!(continuation("> - "), ">   ");
        assert!(is_blank_line("> "));
        assert!(!is_blank_line("> text"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "```json\n[]\n```\n";
        assert_eq!(extract(text), extract(text));
    }
}
