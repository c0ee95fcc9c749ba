//! # Output Blocks
//!
//! The flat block sequence produced by conversion. Every block and span has
//! a unique `key`; nesting only happens inside [`HighlightBlock::content`] and
//! [`TableCell::content`].
//!
//! Each block struct serializes with its own `type` discriminant, so the same
//! [`TextBlock`] reads identically at the top level and nested inside a
//! callout or table cell.

use serde::Serialize;

use crate::models::Span;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Block {
    Text(TextBlock),
    Code(CodeBlock),
    Highlight(HighlightBlock),
    Image(ImageBlock),
    Table(TableBlock),
    Separator(SeparatorBlock),
}

impl Block {
    pub fn key(&self) -> &str {
        match self {
            Block::Text(b) => &b.key,
            Block::Code(b) => &b.key,
            Block::Highlight(b) => &b.key,
            Block::Image(b) => &b.key,
            Block::Table(b) => &b.key,
            Block::Separator(b) => &b.key,
        }
    }

    /// The serialized `type` discriminant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Text(_) => "block",
            Block::Code(_) => "codeBlock",
            Block::Highlight(_) => "highlightBlock",
            Block::Image(_) => "image",
            Block::Table(_) => "table",
            Block::Separator(_) => "separator",
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    Normal,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Blockquote,
}

impl BlockStyle {
    /// Heading style for `depth`, or `None` outside 1..=6.
    pub fn heading(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(BlockStyle::H1),
            2 => Some(BlockStyle::H2),
            3 => Some(BlockStyle::H3),
            4 => Some(BlockStyle::H4),
            5 => Some(BlockStyle::H5),
            6 => Some(BlockStyle::H6),
            _ => None,
        }
    }

    /// Numeric suffix of an `hN` style.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockStyle::H1 => Some(1),
            BlockStyle::H2 => Some(2),
            BlockStyle::H3 => Some(3),
            BlockStyle::H4 => Some(4),
            BlockStyle::H5 => Some(5),
            BlockStyle::H6 => Some(6),
            BlockStyle::Normal | BlockStyle::Blockquote => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStyle::Normal => "normal",
            BlockStyle::H1 => "h1",
            BlockStyle::H2 => "h2",
            BlockStyle::H3 => "h3",
            BlockStyle::H4 => "h4",
            BlockStyle::H5 => "h5",
            BlockStyle::H6 => "h6",
            BlockStyle::Blockquote => "blockquote",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Number,
}

/// Paragraph, heading, quote or list item text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "block", rename_all = "camelCase")]
pub struct TextBlock {
    pub key: String,
    pub style: BlockStyle,
    /// Present iff `style` is a heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Present iff the block is list content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_item: Option<ListKind>,
    pub children: Vec<Span>,
}

impl TextBlock {
    pub fn new(key: String, style: BlockStyle, children: Vec<Span>) -> Self {
        Self {
            key,
            level: style.heading_level(),
            style,
            list_item: None,
            children,
        }
    }

    pub fn list_item(key: String, kind: ListKind, children: Vec<Span>) -> Self {
        Self {
            list_item: Some(kind),
            ..Self::new(key, BlockStyle::Normal, children)
        }
    }

    /// Span texts joined without a separator.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "codeBlock")]
pub struct CodeBlock {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Info,
    Warning,
    Error,
    Success,
    Note,
}

impl HighlightKind {
    pub const ALL: [HighlightKind; 5] = [
        HighlightKind::Info,
        HighlightKind::Warning,
        HighlightKind::Error,
        HighlightKind::Success,
        HighlightKind::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightKind::Info => "info",
            HighlightKind::Warning => "warning",
            HighlightKind::Error => "error",
            HighlightKind::Success => "success",
            HighlightKind::Note => "note",
        }
    }
}

impl std::str::FromStr for HighlightKind {
    type Err = String;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HighlightKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown highlight kind: {s}"))
    }
}

/// Callout detected from a specially-patterned blockquote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "highlightBlock")]
pub struct HighlightBlock {
    pub key: String,
    pub kind: HighlightKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: Vec<TextBlock>,
}

/// Image with an unresolved asset reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "image", rename_all = "camelCase")]
pub struct ImageBlock {
    pub key: String,
    pub asset_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "table")]
pub struct TableBlock {
    pub key: String,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub key: String,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub key: String,
    pub content: Vec<TextBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "separator")]
pub struct SeparatorBlock {
    pub key: String,
}
