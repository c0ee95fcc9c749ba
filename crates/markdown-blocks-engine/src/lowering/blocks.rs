//! Block lowerers, one per block-level node type.
//!
//! Headings, paragraphs, code, tables and thematic breaks each lower to
//! exactly one block. Lists lower to one block per item. Blockquotes lower
//! to one quote block unless [`detect_highlight`] claims them.

use crate::ast::Node;
use crate::keys::KeyGenerator;
use crate::lowering::highlight::detect_highlight;
use crate::lowering::inline::convert_inlines;
use crate::models::{
    Block, BlockStyle, CodeBlock, ImageBlock, ListKind, SeparatorBlock, Span, TableBlock,
    TableCell, TableRow, TextBlock,
};

pub fn convert_heading(depth: u8, children: &[Node], keys: &dyn KeyGenerator) -> Block {
    let style = BlockStyle::heading(depth.clamp(1, 6)).unwrap_or(BlockStyle::H1);
    Block::Text(TextBlock::new(
        keys.next_key(),
        style,
        convert_inlines(children, keys),
    ))
}

/// A paragraph holding nothing but one image lowers to an image block.
pub fn convert_paragraph(children: &[Node], keys: &dyn KeyGenerator) -> Block {
    if let Some(image) = sole_image(children, keys) {
        return Block::Image(image);
    }
    Block::Text(TextBlock::new(
        keys.next_key(),
        BlockStyle::Normal,
        convert_inlines(children, keys),
    ))
}

pub fn convert_code(
    lang: Option<&str>,
    meta: Option<&str>,
    value: &str,
    keys: &dyn KeyGenerator,
) -> Block {
    let (language, filename) = code_language_and_filename(lang, meta);
    Block::Code(CodeBlock {
        key: keys.next_key(),
        language,
        filename,
        code: value.to_string(),
    })
}

pub fn convert_blockquote(node: &Node, keys: &dyn KeyGenerator) -> Block {
    match detect_highlight(node, keys) {
        Some(highlight) => Block::Highlight(highlight),
        None => Block::Text(convert_blockquote_text(node.children(), keys)),
    }
}

/// Flattens the paragraphs of a blockquote into one quote-styled block.
/// Anything other than a direct paragraph child is dropped.
pub fn convert_blockquote_text(children: &[Node], keys: &dyn KeyGenerator) -> TextBlock {
    let key = keys.next_key();
    TextBlock::new(
        key,
        BlockStyle::Blockquote,
        paragraph_spans(children, keys),
    )
}

/// One block per item. Nested lists inside an item are not walked.
pub fn convert_list(ordered: bool, items: &[Node], keys: &dyn KeyGenerator) -> Vec<Block> {
    let kind = if ordered {
        ListKind::Number
    } else {
        ListKind::Bullet
    };
    items
        .iter()
        .map(|item| {
            let key = keys.next_key();
            Block::Text(TextBlock::list_item(
                key,
                kind,
                paragraph_spans(item.children(), keys),
            ))
        })
        .collect()
}

pub fn convert_table(rows: &[Node], keys: &dyn KeyGenerator) -> Block {
    let key = keys.next_key();
    let rows = rows
        .iter()
        .map(|row| TableRow {
            key: keys.next_key(),
            cells: row
                .children()
                .iter()
                .map(|cell| convert_table_cell(cell, keys))
                .collect(),
        })
        .collect();
    Block::Table(TableBlock { key, rows })
}

fn convert_table_cell(cell: &Node, keys: &dyn KeyGenerator) -> TableCell {
    let key = keys.next_key();
    let paragraph = TextBlock::new(
        keys.next_key(),
        BlockStyle::Normal,
        convert_inlines(cell.children(), keys),
    );
    TableCell {
        key,
        content: vec![paragraph],
    }
}

pub fn convert_thematic_break(keys: &dyn KeyGenerator) -> Block {
    Block::Separator(SeparatorBlock {
        key: keys.next_key(),
    })
}

/// Empty stand-in for a block node the engine does not recognize.
pub fn placeholder_block(keys: &dyn KeyGenerator) -> Block {
    Block::Text(TextBlock::new(keys.next_key(), BlockStyle::Normal, Vec::new()))
}

fn paragraph_spans(children: &[Node], keys: &dyn KeyGenerator) -> Vec<Span> {
    children
        .iter()
        .filter_map(|child| match child {
            Node::Paragraph { children } => Some(convert_inlines(children, keys)),
            _ => None,
        })
        .flatten()
        .collect()
}

fn sole_image(children: &[Node], keys: &dyn KeyGenerator) -> Option<ImageBlock> {
    let mut significant = children
        .iter()
        .filter(|c| !matches!(c, Node::Text { value } if value.trim().is_empty()));
    let first = significant.next()?;
    if significant.next().is_some() {
        return None;
    }
    match first {
        Node::Image { url, title, alt } => Some(ImageBlock {
            key: keys.next_key(),
            asset_ref: url.clone(),
            alt: alt.clone(),
            caption: title.clone(),
        }),
        _ => None,
    }
}

/// Reads a filename out of `lang:file.rs`, `title="file.rs"` or
/// `filename=file.rs`.
fn code_language_and_filename(
    lang: Option<&str>,
    meta: Option<&str>,
) -> (Option<String>, Option<String>) {
    let (language, inline_filename) = match lang {
        Some(lang) => match lang.split_once(':') {
            Some((language, file)) => (non_empty(language), non_empty(file)),
            None => (non_empty(lang), None),
        },
        None => (None, None),
    };
    let filename = inline_filename.or_else(|| meta.and_then(meta_filename));
    (language, filename)
}

fn meta_filename(meta: &str) -> Option<String> {
    for attr in ["title=", "filename="] {
        if let Some(start) = meta.find(attr) {
            let rest = &meta[start + attr.len()..];
            let value = match rest.strip_prefix('"') {
                Some(quoted) => quoted.split('"').next().unwrap_or_default(),
                None => rest.split_whitespace().next().unwrap_or_default(),
            };
            if let Some(value) = non_empty(value) {
                return Some(value);
            }
        }
    }
    None
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
