//! Markdown → sanitized rich document
//!
//! Message text is parsed with pulldown-cmark into a closed set of block and
//! span kinds. Nothing in the output is executable or interpreted markup:
//! - raw HTML is kept as literal text
//! - link targets survive only for `http`, `https`, and `mailto`
//! - images are reduced to their alt text
//!
//! Fenced code blocks are highlighted with syntect, using the language tag
//! of the fence and a highlighting theme matching the display mode.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::theme::ThemeMode;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

const SAFE_LINK_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

// ============================================================================
// Document Model
// ============================================================================

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
    /// Sanitized link target
    pub link: Option<String>,
    /// Foreground color from syntax highlighting
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }
}

/// A table cell is a run of spans
pub type Cell = Vec<Span>;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph {
        spans: Vec<Span>,
        /// Inside a block quote
        quoted: bool,
    },
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    ListItem {
        depth: usize,
        /// "•", "3.", or empty for continuation paragraphs
        marker: String,
        /// Task list checkbox state
        task: Option<bool>,
        spans: Vec<Span>,
        /// Inside a block quote
        quoted: bool,
    },
    CodeBlock {
        language: Option<String>,
        lines: Vec<Vec<Span>>,
    },
    Table {
        header: Vec<Cell>,
        rows: Vec<Vec<Cell>>,
    },
    Rule,
}

/// Rendered message content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichDocument {
    pub blocks: Vec<Block>,
}

impl RichDocument {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Readable text without styling, one block per line group.
    pub fn plain_text(&self) -> String {
        let mut out: Vec<String> = Vec::new();

        for block in &self.blocks {
            match block {
                Block::Paragraph { spans, quoted } => {
                    let text = spans_text(spans);
                    if *quoted {
                        out.push(
                            text.lines()
                                .map(|l| format!("> {l}"))
                                .collect::<Vec<_>>()
                                .join("\n"),
                        );
                    } else {
                        out.push(text);
                    }
                }
                Block::Heading { level, spans } => {
                    out.push(format!("{} {}", "#".repeat(*level as usize), spans_text(spans)));
                }
                Block::ListItem {
                    depth,
                    marker,
                    task,
                    spans,
                    quoted,
                } => {
                    let indent = "  ".repeat(depth.saturating_sub(1));
                    let checkbox = match task {
                        Some(true) => "[x] ",
                        Some(false) => "[ ] ",
                        None => "",
                    };
                    let marker = if marker.is_empty() {
                        String::new()
                    } else {
                        format!("{marker} ")
                    };
                    let quote = if *quoted { "> " } else { "" };
                    out.push(format!("{quote}{indent}{marker}{checkbox}{}", spans_text(spans)));
                }
                Block::CodeBlock { language, lines } => {
                    let body = lines
                        .iter()
                        .map(|line| spans_text(line))
                        .collect::<Vec<_>>()
                        .join("\n");
                    out.push(format!("```{}\n{}\n```", language.as_deref().unwrap_or(""), body));
                }
                Block::Table { header, rows } => {
                    let row_text = |cells: &[Cell]| {
                        cells.iter().map(|c| spans_text(c)).collect::<Vec<_>>().join(" | ")
                    };
                    out.push(row_text(header));
                    for row in rows {
                        out.push(row_text(row));
                    }
                }
                Block::Rule => out.push("---".to_string()),
            }
        }

        out.join("\n")
    }
}

fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

// ============================================================================
// Rendering
// ============================================================================

/// Render markdown source into a sanitized rich document.
pub fn render_markdown(source: &str, mode: ThemeMode) -> RichDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = DocumentBuilder::new(mode);
    for event in Parser::new_ext(source, options) {
        builder.handle(event);
    }
    builder.finish()
}

struct ListFrame {
    next_number: Option<u64>,
}

struct ItemFrame {
    depth: usize,
    marker: String,
    task: Option<bool>,
    emitted: bool,
}

#[derive(Default)]
struct TableFrame {
    header: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    row: Vec<Cell>,
}

struct DocumentBuilder {
    mode: ThemeMode,
    blocks: Vec<Block>,
    spans: Vec<Span>,

    bold: usize,
    italic: usize,
    strikethrough: usize,
    links: Vec<Option<String>>,

    heading: Option<u8>,
    quote_depth: usize,
    lists: Vec<ListFrame>,
    items: Vec<ItemFrame>,
    table: Option<TableFrame>,
    code: Option<(Option<String>, String)>,
}

impl DocumentBuilder {
    fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            blocks: Vec::new(),
            spans: Vec::new(),
            bold: 0,
            italic: 0,
            strikethrough: 0,
            links: Vec::new(),
            heading: None,
            quote_depth: 0,
            lists: Vec::new(),
            items: Vec::new(),
            table: None,
            code: None,
        }
    }

    fn finish(mut self) -> RichDocument {
        self.flush();
        RichDocument { blocks: self.blocks }
    }

    fn current_style(&self) -> SpanStyle {
        SpanStyle {
            bold: self.bold > 0 || self.heading.is_some(),
            italic: self.italic > 0,
            strikethrough: self.strikethrough > 0,
            code: false,
            link: self.links.last().cloned().flatten(),
            color: None,
        }
    }

    fn push_span(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.current_style();
        self.push_span(text, style);
    }

    /// Close the pending run of spans into a block.
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);

        if let Some(table) = self.table.as_mut() {
            table.row.push(spans);
            return;
        }

        if let Some(level) = self.heading {
            self.blocks.push(Block::Heading { level, spans });
            return;
        }

        if let Some(item) = self.items.last_mut() {
            let marker = if item.emitted {
                String::new()
            } else {
                item.marker.clone()
            };
            let task = if item.emitted { None } else { item.task };
            item.emitted = true;
            self.blocks.push(Block::ListItem {
                depth: item.depth,
                marker,
                task,
                spans,
                quoted: self.quote_depth > 0,
            });
            return;
        }

        self.blocks.push(Block::Paragraph {
            spans,
            quoted: self.quote_depth > 0,
        });
    }

    fn handle(&mut self, event: Event<'_>) {
        if let Some((_, buffer)) = self.code.as_mut() {
            match event {
                Event::Text(text) => buffer.push_str(&text),
                Event::End(TagEnd::CodeBlock) => self.end_code_block(),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let style = SpanStyle {
                    code: true,
                    ..self.current_style()
                };
                self.push_span(&code, style);
            }
            // Raw HTML is displayed, never interpreted
            Event::Html(html) | Event::InlineHtml(html) => self.push_span(&html, SpanStyle::default()),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.flush();
                self.blocks.push(Block::Rule);
            }
            Event::TaskListMarker(checked) => {
                if let Some(item) = self.items.last_mut() {
                    item.task = Some(checked);
                }
            }
            Event::FootnoteReference(label) => self.push_text(&format!("[^{label}]")),
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(heading_level(level));
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
                        .next()
                        .filter(|lang| !lang.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::HtmlBlock => self.flush(),
            Tag::List(start) => {
                self.flush();
                self.lists.push(ListFrame { next_number: start });
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len();
                let marker = match self.lists.last_mut() {
                    Some(ListFrame { next_number: Some(n) }) => {
                        let marker = format!("{n}.");
                        *n += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.items.push(ItemFrame {
                    depth,
                    marker,
                    task: None,
                    emitted: false,
                });
            }
            Tag::Table(_) => {
                self.flush();
                self.table = Some(TableFrame::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {}
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.links.push(sanitize_link(&dest_url)),
            Tag::Image { .. } => {
                // Never fetched; the alt text stands in for the image
                self.links.push(None);
                self.push_text("[image: ");
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush(),
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = None;
            }
            TagEnd::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::HtmlBlock => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Item => {
                self.flush();
                if let Some(item) = self.items.pop() {
                    // An item with no text still shows its marker
                    if !item.emitted {
                        self.blocks.push(Block::ListItem {
                            depth: item.depth,
                            marker: item.marker,
                            task: item.task,
                            spans: Vec::new(),
                            quoted: self.quote_depth > 0,
                        });
                    }
                }
            }
            TagEnd::TableCell => {
                let spans = std::mem::take(&mut self.spans);
                if let Some(table) = self.table.as_mut() {
                    table.row.push(spans);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::Link => {
                self.links.pop();
            }
            TagEnd::Image => {
                self.push_text("]");
                self.links.pop();
            }
            _ => {}
        }
    }

    fn end_code_block(&mut self) {
        if let Some((language, source)) = self.code.take() {
            let lines = highlight_code(&source, language.as_deref(), self.mode);
            self.blocks.push(Block::CodeBlock { language, lines });
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Keep a link target only if it uses an allowed scheme.
fn sanitize_link(dest: &str) -> Option<String> {
    let trimmed = dest.trim();
    let lower = trimmed.to_ascii_lowercase();
    SAFE_LINK_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
        .then(|| trimmed.to_string())
}

// ============================================================================
// Syntax Highlighting
// ============================================================================

fn highlight_theme_name(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => "base16-ocean.dark",
        ThemeMode::Light => "InspiredGitHub",
    }
}

/// Highlight `source` line by line. Unknown languages fall back to plain text.
fn highlight_code(source: &str, language: Option<&str>, mode: ThemeMode) -> Vec<Vec<Span>> {
    let syntax_set = syntax_set();
    let themes = theme_set();

    let syntax = language
        .and_then(|lang| syntax_set.find_syntax_by_token(lang))
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let theme = themes
        .themes
        .get(highlight_theme_name(mode))
        .or_else(|| themes.themes.values().next());

    let Some(theme) = theme else {
        return unhighlighted(source);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(source) {
        let ranges = match highlighter.highlight_line(line, syntax_set) {
            Ok(ranges) => ranges,
            Err(e) => {
                tracing::debug!("Highlighting failed, using plain text: {}", e);
                return unhighlighted(source);
            }
        };

        let spans = ranges
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches(['\n', '\r']);
                (!text.is_empty()).then(|| Span {
                    text: text.to_string(),
                    style: SpanStyle {
                        code: true,
                        color: Some(Color {
                            r: style.foreground.r,
                            g: style.foreground.g,
                            b: style.foreground.b,
                            a: style.foreground.a,
                        }),
                        ..SpanStyle::default()
                    },
                })
            })
            .collect();
        lines.push(spans);
    }

    lines
}

fn unhighlighted(source: &str) -> Vec<Vec<Span>> {
    source
        .lines()
        .map(|line| {
            vec![Span {
                text: line.to_string(),
                style: SpanStyle {
                    code: true,
                    ..SpanStyle::default()
                },
            }]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_paragraph(doc: &RichDocument) -> &[Span] {
        match doc.blocks.as_slice() {
            [Block::Paragraph { spans, .. }] => spans,
            other => panic!("expected a single paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_bold_and_inline_code() {
        let doc = render_markdown("**bold** `code`", ThemeMode::Light);
        let spans = only_paragraph(&doc);

        let bold = spans.iter().find(|s| s.text == "bold").unwrap();
        assert!(bold.style.bold);
        assert!(!bold.style.code);

        let code = spans.iter().find(|s| s.text == "code").unwrap();
        assert!(code.style.code);
        assert!(!code.style.bold);

        let text = spans_text(spans);
        assert_eq!(text, "bold code");
        assert!(!text.contains('*'));
        assert!(!text.contains('`'));
    }

    #[test]
    fn test_adjacent_plain_text_merges() {
        let doc = render_markdown("one\ntwo", ThemeMode::Light);
        let spans = only_paragraph(&doc);
        assert_eq!(spans, &[Span::plain("one two")]);
    }

    #[test]
    fn test_raw_html_is_literal() {
        let doc = render_markdown("hi <script>alert(1)</script> there", ThemeMode::Light);
        let text = doc.plain_text();
        assert!(text.contains("<script>alert(1)</script>"));
        assert!(doc.blocks.iter().all(|b| !matches!(b, Block::CodeBlock { .. })));
    }

    #[test]
    fn test_html_block_is_literal() {
        let doc = render_markdown("<div onclick=\"x()\">\nhello\n</div>", ThemeMode::Light);
        assert!(doc.plain_text().contains("<div onclick=\"x()\">"));
    }

    #[test]
    fn test_link_sanitization() {
        let doc = render_markdown(
            "[safe](https://example.com) [bad](javascript:alert(1)) [mail](mailto:a@b.c)",
            ThemeMode::Light,
        );
        let spans = only_paragraph(&doc);

        let safe = spans.iter().find(|s| s.text == "safe").unwrap();
        assert_eq!(safe.style.link.as_deref(), Some("https://example.com"));

        // The unsafe link keeps its text but loses its target
        let bad = spans.iter().find(|s| s.text.contains("bad")).unwrap();
        assert_eq!(bad.style.link, None);
        assert!(spans
            .iter()
            .filter_map(|s| s.style.link.as_deref())
            .all(|link| !link.starts_with("javascript")));

        let mail = spans.iter().find(|s| s.text == "mail").unwrap();
        assert_eq!(mail.style.link.as_deref(), Some("mailto:a@b.c"));
    }

    #[test]
    fn test_image_becomes_alt_text() {
        let doc = render_markdown("![a cat](https://example.com/cat.png)", ThemeMode::Light);
        let spans = only_paragraph(&doc);
        assert_eq!(spans_text(spans), "[image: a cat]");
        assert!(spans.iter().all(|s| s.style.link.is_none()));
    }

    #[test]
    fn test_fenced_code_is_highlighted() {
        let doc = render_markdown("```rust\nfn main() {}\nlet x = 1;\n```", ThemeMode::Dark);

        match doc.blocks.as_slice() {
            [Block::CodeBlock { language, lines }] => {
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(lines.len(), 2);
                assert_eq!(spans_text(&lines[0]), "fn main() {}");
                assert!(lines[0].iter().all(|s| s.style.code && s.style.color.is_some()));
                // Keywords and identifiers get different colors
                let colors: std::collections::HashSet<_> =
                    lines[0].iter().filter_map(|s| s.style.color).map(|c| (c.r, c.g, c.b)).collect();
                assert!(colors.len() > 1);
            }
            other => panic!("expected a code block, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let doc = render_markdown("```nosuchlang\nsome text\n```", ThemeMode::Light);
        match doc.blocks.as_slice() {
            [Block::CodeBlock { language, lines }] => {
                assert_eq!(language.as_deref(), Some("nosuchlang"));
                assert_eq!(spans_text(&lines[0]), "some text");
            }
            other => panic!("expected a code block, got {:?}", other),
        }
    }

    #[test]
    fn test_code_block_html_is_not_parsed() {
        let doc = render_markdown("```html\n<b>bold?</b>\n```", ThemeMode::Light);
        match doc.blocks.as_slice() {
            [Block::CodeBlock { lines, .. }] => assert_eq!(spans_text(&lines[0]), "<b>bold?</b>"),
            other => panic!("expected a code block, got {:?}", other),
        }
    }

    #[test]
    fn test_headings_and_lists() {
        let doc = render_markdown("# Title\n\n- one\n- two\n\n3. three\n4. four", ThemeMode::Light);

        assert!(matches!(&doc.blocks[0], Block::Heading { level: 1, spans } if spans_text(spans) == "Title"));

        let items: Vec<(String, String)> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { marker, spans, .. } => Some((marker.clone(), spans_text(spans))),
                _ => None,
            })
            .collect();
        assert_eq!(
            items,
            vec![
                ("•".to_string(), "one".to_string()),
                ("•".to_string(), "two".to_string()),
                ("3.".to_string(), "three".to_string()),
                ("4.".to_string(), "four".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_list_depth() {
        let doc = render_markdown("- outer\n  - inner", ThemeMode::Light);
        let depths: Vec<usize> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { depth, .. } => Some(*depth),
                _ => None,
            })
            .collect();
        assert_eq!(depths, vec![1, 2]);
    }

    #[test]
    fn test_task_list() {
        let doc = render_markdown("- [x] done\n- [ ] todo", ThemeMode::Light);
        let tasks: Vec<Option<bool>> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { task, .. } => Some(*task),
                _ => None,
            })
            .collect();
        assert_eq!(tasks, vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_block_quote() {
        let doc = render_markdown("> quoted *text*\n\nafter", ThemeMode::Light);
        assert!(matches!(&doc.blocks[0], Block::Paragraph { quoted: true, .. }));
        assert!(matches!(&doc.blocks[1], Block::Paragraph { quoted: false, .. }));
        assert_eq!(doc.plain_text(), "> quoted text\nafter");
    }

    #[test]
    fn test_list_inside_block_quote() {
        let doc = render_markdown("> - quoted item

- plain item", ThemeMode::Light);
        assert!(matches!(
            &doc.blocks[0],
            Block::ListItem { quoted: true, depth: 1, .. }
        ));
        assert!(matches!(&doc.blocks[1], Block::ListItem { quoted: false, .. }));
        assert_eq!(doc.plain_text(), "> • quoted item\n• plain item");
    }

    #[test]
    fn test_table() {
        let doc = render_markdown("| a | b |\n|---|---|\n| 1 | **2** |", ThemeMode::Light);
        match doc.blocks.as_slice() {
            [Block::Table { header, rows }] => {
                assert_eq!(header.len(), 2);
                assert_eq!(spans_text(&header[0]), "a");
                assert_eq!(rows.len(), 1);
                assert!(rows[0][1][0].style.bold);
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_strikethrough_and_rule() {
        let doc = render_markdown("~~gone~~\n\n---", ThemeMode::Light);
        let spans = match &doc.blocks[0] {
            Block::Paragraph { spans, .. } => spans,
            other => panic!("expected paragraph, got {:?}", other),
        };
        assert!(spans[0].style.strikethrough);
        assert_eq!(doc.blocks[1], Block::Rule);
    }

    #[test]
    fn test_empty_source() {
        let doc = render_markdown("", ThemeMode::Light);
        assert!(doc.is_empty());
        assert_eq!(doc.plain_text(), "");
    }
}
