//! # Lowering
//!
//! Walks the top-level nodes of a Markdown tree and lowers each to one or
//! more output blocks, flattening everything into a single sequence.
//!
//! ## Modules
//!
//! - **`inline`**: mark composition, inline nodes to [`Span`](crate::models::Span)s
//! - **`blocks`**: one lowerer per block-level node type
//! - **`highlight`**: callout detection for blockquotes
//!
//! Unrecognized node types never fail the conversion; they lower to an empty
//! placeholder block (or span, for inline content).

pub mod blocks;
pub mod highlight;
pub mod inline;

pub use highlight::detect_highlight;
pub use inline::{convert_inline, convert_inlines};

use crate::ast::Node;
use crate::keys::KeyGenerator;
use crate::models::Block;

/// Lowers a document root (or any container) to its flat block sequence.
pub fn lower_document(root: &Node, keys: &dyn KeyGenerator) -> Vec<Block> {
    root.children()
        .iter()
        .flat_map(|node| lower_node(node, keys))
        .collect()
}

/// Routes one top-level node to its lowerer.
pub fn lower_node(node: &Node, keys: &dyn KeyGenerator) -> Vec<Block> {
    match node {
        Node::Heading { depth, children } => vec![blocks::convert_heading(*depth, children, keys)],
        Node::Paragraph { children } => vec![blocks::convert_paragraph(children, keys)],
        Node::Code { lang, meta, value } => vec![blocks::convert_code(
            lang.as_deref(),
            meta.as_deref(),
            value,
            keys,
        )],
        Node::Blockquote { .. } => vec![blocks::convert_blockquote(node, keys)],
        Node::List {
            ordered, children, ..
        } => blocks::convert_list(*ordered, children, keys),
        Node::Table { children } => vec![blocks::convert_table(children, keys)],
        Node::ThematicBreak => vec![blocks::convert_thematic_break(keys)],
        other => {
            log::debug!("unhandled block node `{}`, emitting placeholder block", other.kind());
            vec![blocks::placeholder_block(keys)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SequentialKeys;
    use crate::models::BlockStyle;

    #[test]
    fn test_empty_root_lowers_to_nothing() {
        let root = Node::Root { children: vec![] };
        assert!(lower_document(&root, &SequentialKeys::new()).is_empty());
    }

    #[test]
    fn test_list_items_flatten_into_document() {
        let item = |t: &str| Node::ListItem {
            children: vec![Node::Paragraph {
                children: vec![Node::Text {
                    value: t.to_string(),
                }],
            }],
        };
        let root = Node::Root {
            children: vec![
                Node::ThematicBreak,
                Node::List {
                    ordered: true,
                    start: Some(1),
                    children: vec![item("a"), item("b"), item("c")],
                },
            ],
        };
        let blocks = lower_document(&root, &SequentialKeys::new());
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].type_name(), "separator");
        assert!(blocks[1..].iter().all(|b| b.type_name() == "block"));
    }

    #[test]
    fn test_unknown_block_becomes_placeholder() {
        let blocks = lower_node(
            &Node::Html {
                value: "<br>".to_string(),
            },
            &SequentialKeys::new(),
        );
        assert_eq!(blocks.len(), 1);
        let text = blocks[0].as_text().expect("text placeholder");
        assert_eq!(text.style, BlockStyle::Normal);
        assert!(text.children.is_empty());
    }
}
