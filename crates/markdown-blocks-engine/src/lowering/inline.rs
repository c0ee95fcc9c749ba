//! Mark composition: inline nodes to spans.

use crate::ast::Node;
use crate::keys::KeyGenerator;
use crate::models::{Mark, Span};

/// Converts one inline node into spans.
///
/// Decorations recurse into their children and then append their own mark,
/// so marks end up ordered innermost-applied first. Inline code is a leaf
/// with exactly `[code]`. Unrecognized nodes become one empty span.
pub fn convert_inline(node: &Node, keys: &dyn KeyGenerator) -> Vec<Span> {
    match node {
        Node::Text { value } => vec![Span::new(keys.next_key(), value.as_str())],
        Node::InlineCode { value } => {
            vec![Span::new(keys.next_key(), value.as_str()).with_mark(Mark::Code)]
        }
        Node::Strong { children } => decorate(children, Mark::Strong, keys),
        Node::Emphasis { children } => decorate(children, Mark::Em, keys),
        Node::Delete { children } => decorate(children, Mark::StrikeThrough, keys),
        // The link target is not carried into the output.
        Node::Link { children, .. } => decorate(children, Mark::Link, keys),
        other => {
            log::debug!("unhandled inline node `{}`, emitting placeholder span", other.kind());
            vec![Span::placeholder(keys.next_key())]
        }
    }
}

/// Converts a run of sibling inline nodes, concatenating their spans.
pub fn convert_inlines(nodes: &[Node], keys: &dyn KeyGenerator) -> Vec<Span> {
    nodes
        .iter()
        .flat_map(|node| convert_inline(node, keys))
        .collect()
}

fn decorate(children: &[Node], mark: Mark, keys: &dyn KeyGenerator) -> Vec<Span> {
    convert_inlines(children, keys)
        .into_iter()
        .map(|span| span.with_mark(mark))
        .collect()
}
