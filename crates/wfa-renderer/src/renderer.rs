//! Markdown to HTML renderer built on pulldown-cmark events.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::html;
use crate::state::{
    CodeBlockState, Heading, HeadingState, ImageState, TableState, escape_html,
};
use crate::util::heading_level_to_num;

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

/// Parser options shared by the renderer and anything that tokenizes the same
/// markdown (the segment extractor must see the same block structure).
#[must_use]
pub fn parser_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    } else {
        Options::empty()
    }
}

/// Markdown renderer producing an HTML fragment.
///
/// A renderer holds per-document state; create one per document.
///
/// # Raw HTML
///
/// Markdown from a remote model may contain arbitrary markup. With raw HTML
/// disabled (the default) HTML blocks and inline HTML are escaped and shown as
/// text, and links or images with script-capable URL schemes are neutralised.
/// Lines registered with [`with_anchor`](Self::with_anchor) are always written
/// verbatim so callers can locate them in the output.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    /// Buffered HTML block, flushed at the block end.
    html_block: Option<String>,
    anchors: Vec<String>,
    gfm: bool,
    raw_html: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled and raw HTML escaped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            html_block: None,
            anchors: Vec::new(),
            gfm: true,
            raw_html: false,
        }
    }

    /// Enable or disable GitHub Flavored Markdown (tables, strikethrough, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Pass raw HTML from the markdown through unescaped.
    #[must_use]
    pub fn with_raw_html(mut self, enabled: bool) -> Self {
        self.raw_html = enabled;
        self
    }

    /// Register an anchor line that must survive rendering byte-for-byte.
    ///
    /// The anchor must appear in the markdown as its own HTML block.
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchors.push(anchor.into());
        self
    }

    #[must_use]
    pub fn parser_options(&self) -> Options {
        parser_options(self.gfm)
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Render markdown text using the configured parser options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(self.create_parser(markdown))
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            headings: self.heading.take_outline(),
        }
    }

    /// Push inline content to the heading buffer or the output.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.block_html(&html),
            Event::InlineHtml(html) => self.inline_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written at the end, once the id is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => info
                        .split_whitespace()
                        .next()
                        .map(ToOwned::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::HtmlBlock => self.html_block = Some(String::new()),
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link { dest_url, .. } => {
                let href = self.link_target(&dest_url);
                let link_tag = format!(r#"<a href="{}">"#, escape_html(href));
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    write!(
                        self.output,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        html.trim()
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                html::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::HtmlBlock => {
                if let Some(block) = self.html_block.take() {
                    self.flush_html_block(&block);
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let mut img = String::new();
                    html::image(self.link_target(&src), &alt, &title, &mut img);
                    self.push_inline(&img);
                }
            }
            TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn link_target<'u>(&self, url: &'u str) -> &'u str {
        if self.raw_html {
            url
        } else {
            html::sanitize_url(url)
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        let html = format!("<code>{}</code>", escape_html(code));
        self.push_inline(&html);
    }

    fn block_html(&mut self, html: &str) {
        match self.html_block.as_mut() {
            Some(block) => block.push_str(html),
            None => self.flush_html_block(html),
        }
    }

    fn flush_html_block(&mut self, block: &str) {
        let trimmed = block.trim_end();
        if self.raw_html || self.anchors.iter().any(|a| a == trimmed) {
            self.output.push_str(block);
        } else if !trimmed.is_empty() {
            write!(self.output, "<p>{}</p>", escape_html(trimmed)).unwrap();
        }
    }

    fn inline_html(&mut self, html: &str) {
        if self.raw_html {
            self.push_inline(html);
        } else {
            let escaped = escape_html(html);
            self.push_inline(&escaped);
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else {
            self.push_inline("\n");
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::new().render_markdown(markdown)
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!").html, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_id() {
        let result = render("## Section Title");
        assert_eq!(result.html, r#"<h2 id="section-title">Section Title</h2>"#);
        assert_eq!(
            result.headings,
            vec![Heading {
                level: 2,
                title: "Section Title".to_owned(),
                id: "section-title".to_owned(),
            }]
        );
    }

    #[test]
    fn test_heading_outline_in_document_order() {
        let result = render("## A\n\ntext\n\n## B\n\n### C");
        let titles: Vec<_> = result.headings.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert_eq!(result.headings[2].level, 3);
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render("## Install `npm`");
        assert!(result.html.contains("<code>npm</code>"));
        assert_eq!(result.headings[0].title, "Install npm");
    }

    #[test]
    fn test_fenced_code_block() {
        let result = render("```json\n[bad json\n```");
        assert_eq!(
            result.html,
            "<pre><code class=\"language-json\">[bad json\n</code></pre>"
        );
    }

    #[test]
    fn test_blockquote_and_lists() {
        let result = render("> **QUICK WIN:**\n> * Zapier - cheap\n\n1. First\n2. Second");
        assert!(result.html.contains("<blockquote>"));
        assert!(result.html.contains("<strong>QUICK WIN:</strong>"));
        assert!(result.html.contains("<ul>"));
        assert!(result.html.contains("<ol>"));
    }

    #[test]
    fn test_table() {
        let result = render("| Risk | Guardrail |\n|:---|---:|\n| Churn | Review |");
        assert!(result.html.contains("<table><thead><tr>"));
        assert!(result.html.contains(r#"<th style="text-align:left">Risk</th>"#));
        assert!(result.html.contains(r#"<td style="text-align:right">Review</td>"#));
        assert!(result.html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_horizontal_rule() {
        let result = render("one\n\n---\n\ntwo");
        assert_eq!(result.html, "<p>one</p><hr><p>two</p>");
    }

    #[test]
    fn test_task_list() {
        let result = render("- [ ] Unchecked\n- [x] Checked");
        assert!(result.html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(result.html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_gfm_disabled() {
        let mut renderer = MarkdownRenderer::new().with_gfm(false);
        let result = renderer.render_markdown("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(!result.html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_block_escaped_by_default() {
        let result = render("<script>alert(1)</script>\n\nafter");
        assert!(!result.html.contains("<script>"));
        assert!(result.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(result.html.contains("<p>after</p>"));
    }

    #[test]
    fn test_inline_html_escaped_by_default() {
        let result = render("Label<br>By: Jenna");
        assert_eq!(result.html, "<p>Label&lt;br&gt;By: Jenna</p>");
    }

    #[test]
    fn test_raw_html_passthrough_when_enabled() {
        let mut renderer = MarkdownRenderer::new().with_raw_html(true);
        let result = renderer.render_markdown("<aside>note</aside>\n\ntext <kbd>K</kbd>");
        assert!(result.html.contains("<aside>note</aside>"));
        assert!(result.html.contains("<kbd>K</kbd>"));
    }

    #[test]
    fn test_anchor_passes_through_in_safe_mode() {
        let anchor = r#"<div data-slot="roi" id="slot-roi-1234"></div>"#;
        let mut renderer = MarkdownRenderer::new().with_anchor(anchor);
        let markdown = format!("## Stack\n{anchor}\n\n## Next");
        let result = renderer.render_markdown(&markdown);
        assert!(result.html.contains(anchor));
        assert!(result.html.contains(r#"<h2 id="next">Next</h2>"#));
    }

    #[test]
    fn test_unregistered_anchor_lookalike_is_escaped() {
        let mut renderer = MarkdownRenderer::new()
            .with_anchor(r#"<div data-slot="roi" id="slot-roi-1234"></div>"#);
        let result =
            renderer.render_markdown("<div data-slot=\"roi\" id=\"slot-roi-9999\"></div>\n");
        assert!(!result.html.contains("<div"));
    }

    #[test]
    fn test_script_link_neutralised() {
        let result = render("[click](javascript:alert(1))");
        assert_eq!(result.html, r##"<p><a href="#">click</a></p>"##);
    }

    #[test]
    fn test_external_link_kept() {
        let result = render("[Workato](https://www.workato.com)");
        assert_eq!(
            result.html,
            r#"<p><a href="https://www.workato.com">Workato</a></p>"#
        );
    }

    #[test]
    fn test_image() {
        let result = render("![Alt text](image.png)");
        assert!(result.html.contains(r#"<img src="image.png" alt="Alt text">"#));
    }

    #[test]
    fn test_image_inside_heading() {
        let result = render("## Logo ![icon](i.png) Tools");
        assert!(result.html.starts_with("<h2 id="));
        assert!(
            result
                .html
                .ends_with(r#">Logo <img src="i.png" alt="icon"> Tools</h2>"#)
        );
        assert_eq!(result.headings.len(), 1);
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        let result = render("*italic* **bold** ~~gone~~");
        assert!(result.html.contains("<em>italic</em>"));
        assert!(result.html.contains("<strong>bold</strong>"));
        assert!(result.html.contains("<s>gone</s>"));
    }

    #[test]
    fn test_parser_options() {
        assert!(parser_options(true).contains(Options::ENABLE_TABLES));
        assert!(parser_options(true).contains(Options::ENABLE_TASKLISTS));
        assert!(parser_options(false).is_empty());
    }

    #[test]
    fn test_renderer_state_does_not_leak_between_documents() {
        let mut renderer = MarkdownRenderer::new();
        let first = renderer.render_markdown("one");
        let second = renderer.render_markdown("two");
        assert_eq!(first.html, "<p>one</p>");
        assert_eq!(second.html, "<p>two</p>");
    }
}
