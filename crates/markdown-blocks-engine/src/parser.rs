//! # Markdown Parser Adapter
//!
//! Turns Markdown text into the [`Node`] tree consumed by lowering. The
//! tokenizer itself is `pulldown-cmark`; this module only folds its flat
//! event stream back into a tree with a stack of open frames.
//!
//! The folding normalizes a few places where the event stream and the mdast
//! shape disagree:
//! - adjacent text runs and soft breaks merge into one `Text` node
//! - tight list items get their loose inline content wrapped in a paragraph
//! - the table head becomes the first table row
//! - code bodies lose their single trailing newline

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag};

use crate::ast::Node;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("End event {0} arrived with no open element")]
    UnbalancedEnd(String),
    #[error("{0} element(s) still open at end of input")]
    Unclosed(usize),
}

/// Which Markdown extensions the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub smart_punctuation: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            smart_punctuation: false,
        }
    }
}

impl ParseOptions {
    fn to_pulldown(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// Produces a Markdown syntax tree from source text.
pub trait MarkdownParser: Send + Sync {
    fn parse(&self, markdown: &str) -> Result<Node, ParseError>;
}

#[derive(Debug, Default, Clone)]
pub struct PulldownMarkdownParser {
    options: ParseOptions,
}

impl PulldownMarkdownParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }
}

impl MarkdownParser for PulldownMarkdownParser {
    fn parse(&self, markdown: &str) -> Result<Node, ParseError> {
        let mut builder = TreeBuilder::new();
        for event in Parser::new_ext(markdown, self.options.to_pulldown()) {
            builder.push(event)?;
        }
        builder.finish()
    }
}

/// Element kinds that stay open between a `Start` and its `End`.
#[derive(Debug)]
enum FrameKind {
    Root,
    Paragraph,
    Heading(u8),
    Code {
        lang: Option<String>,
        meta: Option<String>,
    },
    Html,
    Blockquote,
    List {
        ordered: bool,
        start: Option<u64>,
    },
    Item,
    Table,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Delete,
    Link {
        url: String,
        title: Option<String>,
    },
    Image {
        url: String,
        title: Option<String>,
    },
    Other(&'static str),
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    children: Vec<Node>,
}

struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                kind: FrameKind::Root,
                children: Vec::new(),
            }],
        }
    }

    fn push(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        match event {
            Event::Start(tag) => self.stack.push(Frame {
                kind: frame_kind(tag),
                children: Vec::new(),
            }),
            Event::End(end) => {
                // The root frame is never closed by an event.
                if self.stack.len() < 2 {
                    return Err(ParseError::UnbalancedEnd(format!("{end:?}")));
                }
                if let Some(frame) = self.stack.pop() {
                    let node = frame.finish();
                    self.append(node);
                }
            }
            Event::Text(text) => self.append_text(&text),
            Event::SoftBreak => self.append_text("\n"),
            Event::Code(code) => self.append(Node::InlineCode {
                value: code.to_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => {
                if matches!(self.top_kind(), FrameKind::Html) {
                    self.append_text(&html);
                } else {
                    self.append(Node::Html {
                        value: html.to_string(),
                    });
                }
            }
            Event::HardBreak => self.append(Node::Break),
            Event::Rule => self.append(Node::ThematicBreak),
            Event::InlineMath(_) => self.append(other("inlineMath")),
            Event::DisplayMath(_) => self.append(other("math")),
            Event::FootnoteReference(_) => self.append(other("footnoteReference")),
            Event::TaskListMarker(_) => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Node, ParseError> {
        if self.stack.len() != 1 {
            return Err(ParseError::Unclosed(self.stack.len() - 1));
        }
        let children = self
            .stack
            .pop()
            .map(|root| root.children)
            .unwrap_or_default();
        Ok(Node::Root { children })
    }

    fn top_kind(&self) -> &FrameKind {
        self.stack
            .last()
            .map(|frame| &frame.kind)
            .unwrap_or(&FrameKind::Root)
    }

    fn append(&mut self, node: Node) {
        if let Some(frame) = self.stack.last_mut() {
            frame.children.push(node);
        }
    }

    fn append_text(&mut self, text: &str) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        match frame.children.last_mut() {
            Some(Node::Text { value }) => value.push_str(text),
            _ => frame.children.push(Node::Text {
                value: text.to_string(),
            }),
        }
    }
}

impl Frame {
    fn finish(self) -> Node {
        let children = self.children;
        match self.kind {
            // Only reachable through an unbalanced stream, which push() rejects.
            FrameKind::Root => Node::Root { children },
            FrameKind::Paragraph => Node::Paragraph { children },
            FrameKind::Heading(depth) => Node::Heading { depth, children },
            FrameKind::Code { lang, meta } => {
                let mut value = literal(&children);
                if value.ends_with('\n') {
                    value.pop();
                }
                Node::Code { lang, meta, value }
            }
            FrameKind::Html => Node::Html {
                value: literal(&children),
            },
            FrameKind::Blockquote => Node::Blockquote { children },
            FrameKind::List { ordered, start } => Node::List {
                ordered,
                start,
                children,
            },
            FrameKind::Item => Node::ListItem {
                children: wrap_loose_inline(children),
            },
            FrameKind::Table => Node::Table { children },
            FrameKind::TableRow => Node::TableRow { children },
            FrameKind::TableCell => Node::TableCell { children },
            FrameKind::Emphasis => Node::Emphasis { children },
            FrameKind::Strong => Node::Strong { children },
            FrameKind::Delete => Node::Delete { children },
            FrameKind::Link { url, title } => Node::Link {
                url,
                title,
                children,
            },
            FrameKind::Image { url, title } => {
                let alt: String = children.iter().map(Node::plain_text).collect();
                Node::Image {
                    url,
                    title,
                    alt: non_empty(alt),
                }
            }
            FrameKind::Other(kind) => other(kind),
        }
    }
}

fn frame_kind(tag: Tag<'_>) -> FrameKind {
    match tag {
        Tag::Paragraph => FrameKind::Paragraph,
        Tag::Heading { level, .. } => FrameKind::Heading(heading_depth(level)),
        Tag::BlockQuote(_) => FrameKind::Blockquote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
            let (lang, meta) = split_info_string(&info);
            FrameKind::Code { lang, meta }
        }
        Tag::CodeBlock(CodeBlockKind::Indented) => FrameKind::Code {
            lang: None,
            meta: None,
        },
        Tag::HtmlBlock => FrameKind::Html,
        Tag::List(start) => FrameKind::List {
            ordered: start.is_some(),
            start,
        },
        Tag::Item => FrameKind::Item,
        Tag::Table(_) => FrameKind::Table,
        Tag::TableHead | Tag::TableRow => FrameKind::TableRow,
        Tag::TableCell => FrameKind::TableCell,
        Tag::Emphasis => FrameKind::Emphasis,
        Tag::Strong => FrameKind::Strong,
        Tag::Strikethrough => FrameKind::Delete,
        Tag::Link {
            dest_url, title, ..
        } => FrameKind::Link {
            url: dest_url.to_string(),
            title: optional(title),
        },
        Tag::Image {
            dest_url, title, ..
        } => FrameKind::Image {
            url: dest_url.to_string(),
            title: optional(title),
        },
        Tag::FootnoteDefinition(_) => FrameKind::Other("footnoteDefinition"),
        Tag::MetadataBlock(_) => FrameKind::Other("yaml"),
        _ => FrameKind::Other("unknown"),
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Splits a fence info string into language and trailing meta.
fn split_info_string(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (
            non_empty(lang.to_string()),
            non_empty(meta.trim().to_string()),
        ),
        None => (non_empty(info.to_string()), None),
    }
}

/// Groups runs of inline nodes into paragraphs, leaving block nodes alone.
fn wrap_loose_inline(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    let mut run: Vec<Node> = Vec::new();
    for child in children {
        if child.is_inline() {
            run.push(child);
        } else {
            flush_run(&mut run, &mut out);
            out.push(child);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Node>) {
    if !run.is_empty() {
        out.push(Node::Paragraph {
            children: std::mem::take(run),
        });
    }
}

fn literal(children: &[Node]) -> String {
    children.iter().map(Node::plain_text).collect()
}

fn other(kind: &str) -> Node {
    Node::Other {
        kind: kind.to_string(),
    }
}

fn optional(value: CowStr<'_>) -> Option<String> {
    non_empty(value.to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::TagEnd;

    fn parse(markdown: &str) -> Vec<Node> {
        match PulldownMarkdownParser::new().parse(markdown).unwrap() {
            Node::Root { children } => children,
            other => panic!("expected root, got {other:?}"),
        }
    }

    fn text(value: &str) -> Node {
        Node::Text {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_root() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_heading_depth() {
        assert_eq!(
            parse("### Third"),
            vec![Node::Heading {
                depth: 3,
                children: vec![text("Third")],
            }]
        );
    }

    #[test]
    fn test_soft_breaks_merge_into_text() {
        assert_eq!(
            parse("one\ntwo"),
            vec![Node::Paragraph {
                children: vec![text("one\ntwo")],
            }]
        );
    }

    #[test]
    fn test_tight_list_items_get_paragraphs() {
        let nodes = parse("- a\n- b");
        assert_eq!(
            nodes,
            vec![Node::List {
                ordered: false,
                start: None,
                children: vec![
                    Node::ListItem {
                        children: vec![Node::Paragraph {
                            children: vec![text("a")]
                        }],
                    },
                    Node::ListItem {
                        children: vec![Node::Paragraph {
                            children: vec![text("b")]
                        }],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let nodes = parse("3. x");
        assert!(matches!(
            nodes[0],
            Node::List {
                ordered: true,
                start: Some(3),
                ..
            }
        ));
    }

    #[test]
    fn test_fenced_code_info_string() {
        assert_eq!(
            parse("```rust title=\"main.rs\"\nfn main() {}\n```"),
            vec![Node::Code {
                lang: Some("rust".to_string()),
                meta: Some("title=\"main.rs\"".to_string()),
                value: "fn main() {}".to_string(),
            }]
        );
    }

    #[test]
    fn test_table_head_becomes_first_row() {
        let nodes = parse("| a | b |\n|---|---|\n| 1 | 2 |");
        let Node::Table { children: rows } = &nodes[0] else {
            panic!("expected table, got {:?}", nodes[0]);
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| matches!(r, Node::TableRow { .. })));
        assert_eq!(rows[0].children()[0].plain_text(), "a");
        assert_eq!(rows[1].children()[1].plain_text(), "2");
    }

    #[test]
    fn test_tables_disabled_stay_paragraphs() {
        let parser = PulldownMarkdownParser::with_options(ParseOptions {
            tables: false,
            ..ParseOptions::default()
        });
        let Node::Root { children } = parser.parse("| a |\n|---|").unwrap() else {
            panic!("expected root");
        };
        assert!(matches!(children[0], Node::Paragraph { .. }));
    }

    #[test]
    fn test_image_alt_and_title() {
        assert_eq!(
            parse("![A cat](cat.png \"Sleeping\")"),
            vec![Node::Paragraph {
                children: vec![Node::Image {
                    url: "cat.png".to_string(),
                    title: Some("Sleeping".to_string()),
                    alt: Some("A cat".to_string()),
                }],
            }]
        );
    }

    #[test]
    fn test_rule_and_html() {
        let nodes = parse("---\n\n<div>hi</div>\n");
        assert_eq!(nodes[0], Node::ThematicBreak);
        assert!(matches!(&nodes[1], Node::Html { value } if value.contains("<div>")));
    }

    #[test]
    fn test_unbalanced_end_is_an_error() {
        let mut builder = TreeBuilder::new();
        let result = builder.push(Event::End(TagEnd::Paragraph));
        assert!(matches!(result, Err(ParseError::UnbalancedEnd(_))));
    }

    #[test]
    fn test_unclosed_frame_is_an_error() {
        let mut builder = TreeBuilder::new();
        builder.push(Event::Start(Tag::Paragraph)).unwrap();
        assert_eq!(builder.finish(), Err(ParseError::Unclosed(1)));
    }
}
