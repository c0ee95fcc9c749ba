//! # Markdown AST
//!
//! The tree handed to the lowering stage. It mirrors the mdast node set that
//! a Markdown parser produces: block nodes own block or inline children,
//! inline nodes own inline children, leaves carry their literal value.
//!
//! The engine never builds this tree itself outside of
//! [`crate::parser`]; callers with their own parser can construct it directly
//! and hand it to [`crate::convert::convert_ast`].

/// A node of the Markdown syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Document root; children are the top-level block nodes.
    Root { children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    /// ATX or setext heading with `depth` 1 to 6.
    Heading { depth: u8, children: Vec<Node> },
    /// Fenced or indented code block.
    Code {
        lang: Option<String>,
        /// Remainder of the fence info string after the language.
        meta: Option<String>,
        value: String,
    },
    Blockquote { children: Vec<Node> },
    List {
        ordered: bool,
        start: Option<u64>,
        /// Always [`Node::ListItem`]s.
        children: Vec<Node>,
    },
    ListItem { children: Vec<Node> },
    /// Rows, header row first.
    Table { children: Vec<Node> },
    /// Cells of a single row.
    TableRow { children: Vec<Node> },
    /// Inline phrasing content directly, no intermediate paragraph.
    TableCell { children: Vec<Node> },
    ThematicBreak,

    Text { value: String },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    /// Strike-through (`~~text~~`).
    Delete { children: Vec<Node> },
    InlineCode { value: String },
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Node>,
    },
    Image {
        url: String,
        title: Option<String>,
        alt: Option<String>,
    },
    /// Hard line break.
    Break,
    /// Raw HTML, block or inline.
    Html { value: String },
    /// Anything the parser produced that has no dedicated variant.
    Other { kind: String },
}

impl Node {
    /// The mdast type name of this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Root { .. } => "root",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::Code { .. } => "code",
            Node::Blockquote { .. } => "blockquote",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "listItem",
            Node::Table { .. } => "table",
            Node::TableRow { .. } => "tableRow",
            Node::TableCell { .. } => "tableCell",
            Node::ThematicBreak => "thematicBreak",
            Node::Text { .. } => "text",
            Node::Emphasis { .. } => "emphasis",
            Node::Strong { .. } => "strong",
            Node::Delete { .. } => "delete",
            Node::InlineCode { .. } => "inlineCode",
            Node::Link { .. } => "link",
            Node::Image { .. } => "image",
            Node::Break => "break",
            Node::Html { .. } => "html",
            Node::Other { kind } => kind,
        }
    }

    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children }
            | Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::Blockquote { children }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Table { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. } => children,
            Node::Code { .. }
            | Node::ThematicBreak
            | Node::Text { .. }
            | Node::InlineCode { .. }
            | Node::Image { .. }
            | Node::Break
            | Node::Html { .. }
            | Node::Other { .. } => &[],
        }
    }

    /// Whether this node belongs in phrasing (inline) content.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text { .. }
                | Node::Emphasis { .. }
                | Node::Strong { .. }
                | Node::Delete { .. }
                | Node::InlineCode { .. }
                | Node::Link { .. }
                | Node::Image { .. }
                | Node::Break
        )
    }

    /// Concatenated literal text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { value } | Node::InlineCode { value } | Node::Code { value, .. } => {
            out.push_str(value)
        }
        Node::Image { alt: Some(alt), .. } => out.push_str(alt),
        Node::Break => out.push('\n'),
        other => other.children().iter().for_each(|c| collect_text(c, out)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::Text {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_kind_names_follow_mdast() {
        assert_eq!(Node::ThematicBreak.kind(), "thematicBreak");
        assert_eq!(Node::ListItem { children: vec![] }.kind(), "listItem");
        assert_eq!(
            Node::Other {
                kind: "footnoteReference".to_string()
            }
            .kind(),
            "footnoteReference"
        );
    }

    #[test]
    fn test_plain_text_walks_nested_inline() {
        let node = Node::Paragraph {
            children: vec![
                text("a "),
                Node::Strong {
                    children: vec![text("b "), Node::Emphasis { children: vec![text("c")] }],
                },
                Node::InlineCode {
                    value: "d".to_string(),
                },
            ],
        };
        assert_eq!(node.plain_text(), "a b cd");
    }

    #[test]
    fn test_leaves_have_no_children() {
        assert!(text("x").children().is_empty());
        assert!(Node::Break.children().is_empty());
        assert!(Node::Break.is_inline());
        assert!(!Node::ThematicBreak.is_inline());
    }
}
