//! Callout detection for blockquotes.
//!
//! A blockquote whose first line reads `**warning**: Be careful` becomes a
//! [`HighlightBlock`] of kind `warning` titled `Be careful`. The triggering
//! line stays in the callout content as well as in the title.

use std::sync::OnceLock;

use regex::Regex;

use crate::ast::Node;
use crate::keys::KeyGenerator;
use crate::lowering::blocks::convert_blockquote_text;
use crate::models::{HighlightBlock, HighlightKind};

fn highlight_regex() -> &'static Regex {
    static HIGHLIGHT_REGEX: OnceLock<Regex> = OnceLock::new();
    HIGHLIGHT_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\*\*(info|warning|error|success|note)\*\*:?[ \t]*(.*)$")
            .expect("Invalid highlight regex")
    })
}

/// Reclassifies `node` as a callout if it is a matching blockquote.
pub fn detect_highlight(node: &Node, keys: &dyn KeyGenerator) -> Option<HighlightBlock> {
    let (kind, title) = match_highlight(node)?;
    Some(HighlightBlock {
        key: keys.next_key(),
        kind,
        title,
        content: vec![convert_blockquote_text(node.children(), keys)],
    })
}

/// Kind and title of a callout blockquote, without building any output.
pub fn match_highlight(node: &Node) -> Option<(HighlightKind, Option<String>)> {
    let Node::Blockquote { children } = node else {
        return None;
    };
    let Some(Node::Paragraph { children: inline }) = children.first() else {
        return None;
    };

    let line = first_line(inline);
    let captures = highlight_regex().captures(&line)?;
    let kind = captures.get(1)?.as_str().parse().ok()?;
    let title = captures
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Some((kind, title))
}

/// First source line of a paragraph with emphasis delimiters restored, so
/// the `**kind**` prefix is visible to the pattern.
fn first_line(inline: &[Node]) -> String {
    let mut line = String::new();
    for node in inline {
        match node {
            Node::Strong { .. } => {
                line.push_str("**");
                line.push_str(&node.plain_text());
                line.push_str("**");
            }
            Node::Emphasis { .. } => {
                line.push('*');
                line.push_str(&node.plain_text());
                line.push('*');
            }
            Node::Break => break,
            other => line.push_str(&other.plain_text()),
        }
        if line.contains('\n') {
            break;
        }
    }
    match line.split_once('\n') {
        Some((first, _)) => first.to_string(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SequentialKeys;
    use crate::models::BlockStyle;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(value: &str) -> Node {
        Node::Text {
            value: value.to_string(),
        }
    }

    fn quote(keyword: &str, rest: &str) -> Node {
        Node::Blockquote {
            children: vec![Node::Paragraph {
                children: vec![
                    Node::Strong {
                        children: vec![text(keyword)],
                    },
                    text(rest),
                ],
            }],
        }
    }

    #[rstest]
    #[case("warning", ": Be careful", HighlightKind::Warning, Some("Be careful"))]
    #[case("INFO", ": Heads up", HighlightKind::Info, Some("Heads up"))]
    #[case("Note", " no colon", HighlightKind::Note, Some("no colon"))]
    #[case("success", ":", HighlightKind::Success, None)]
    #[case("error", ": first\nsecond line", HighlightKind::Error, Some("first"))]
    fn test_matching_quotes(
        #[case] keyword: &str,
        #[case] rest: &str,
        #[case] kind: HighlightKind,
        #[case] title: Option<&str>,
    ) {
        assert_eq!(
            match_highlight(&quote(keyword, rest)),
            Some((kind, title.map(str::to_string)))
        );
    }

    #[rstest]
    #[case("tip", ": not a kind")]
    #[case("warning:", " colon inside the bold")]
    fn test_non_matching_quotes(#[case] keyword: &str, #[case] rest: &str) {
        assert_eq!(match_highlight(&quote(keyword, rest)), None);
    }

    #[test]
    fn test_plain_quote_does_not_match() {
        let node = Node::Blockquote {
            children: vec![Node::Paragraph {
                children: vec![text("Just a quote")],
            }],
        };
        assert_eq!(match_highlight(&node), None);
    }

    #[test]
    fn test_first_child_must_be_paragraph() {
        let node = Node::Blockquote {
            children: vec![Node::ThematicBreak, quote("info", ": x")],
        };
        assert_eq!(match_highlight(&node), None);
    }

    #[test]
    fn test_content_keeps_triggering_line() {
        let block = detect_highlight(&quote("warning", ": Be careful"), &SequentialKeys::new())
            .expect("should match");
        assert_eq!(block.kind, HighlightKind::Warning);
        assert_eq!(block.title.as_deref(), Some("Be careful"));
        assert_eq!(block.content.len(), 1);
        assert_eq!(block.content[0].style, BlockStyle::Blockquote);
        assert_eq!(block.content[0].plain_text(), "warning: Be careful");
    }
}
