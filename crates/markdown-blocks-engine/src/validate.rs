//! Structural sanity checks over a block sequence.
//!
//! Checks are top-level only: callout content and table cells are not
//! descended into. Failures are reported as values, never raised; use
//! [`check`] / [`check_json`] to learn which block is at fault, or
//! [`validate`] / [`validate_json`] for a plain verdict.

use serde_json::Value;

use crate::models::{Block, BlockStyle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Expected an array of blocks")]
    NotAnArray,
    #[error("Block {index} is not an object")]
    NotAnObject { index: usize },
    #[error("Block {index} has no type")]
    MissingType { index: usize },
    #[error("Block {index} has no key")]
    MissingKey { index: usize },
    #[error("Block {index}: children must be an array")]
    ChildrenNotArray { index: usize },
    #[error("Block {index}, span {span}: missing type")]
    SpanMissingType { index: usize, span: usize },
    #[error("Block {index}, span {span}: missing key")]
    SpanMissingKey { index: usize, span: usize },
    #[error("Block {index}, span {span}: text must be a string")]
    SpanTextNotString { index: usize, span: usize },
    #[error("Block {index}: level {level:?} does not match style {style}")]
    HeadingLevelMismatch {
        index: usize,
        style: &'static str,
        level: Option<u8>,
    },
    #[error("Block {index}: list content must use the normal style, found {style}")]
    ListItemStyle { index: usize, style: &'static str },
}

pub fn validate(blocks: &[Block]) -> bool {
    check(blocks).is_ok()
}

/// First violation in a typed block sequence.
pub fn check(blocks: &[Block]) -> Result<(), ValidationError> {
    for (index, block) in blocks.iter().enumerate() {
        if block.key().is_empty() {
            return Err(ValidationError::MissingKey { index });
        }
        let Block::Text(text) = block else {
            continue;
        };
        if let Some(span) = text.children.iter().position(|s| s.key.is_empty()) {
            return Err(ValidationError::SpanMissingKey { index, span });
        }
        if text.level != text.style.heading_level() {
            return Err(ValidationError::HeadingLevelMismatch {
                index,
                style: text.style.as_str(),
                level: text.level,
            });
        }
        if text.list_item.is_some() && text.style != BlockStyle::Normal {
            return Err(ValidationError::ListItemStyle {
                index,
                style: text.style.as_str(),
            });
        }
    }
    Ok(())
}

pub fn validate_json(value: &Value) -> bool {
    check_json(value).is_ok()
}

/// First violation in an untyped JSON block array, e.g. one read back from
/// the content backend.
pub fn check_json(value: &Value) -> Result<(), ValidationError> {
    let blocks = value.as_array().ok_or(ValidationError::NotAnArray)?;
    for (index, block) in blocks.iter().enumerate() {
        let block = block
            .as_object()
            .ok_or(ValidationError::NotAnObject { index })?;
        let block_type =
            non_empty_str(block.get("type")).ok_or(ValidationError::MissingType { index })?;
        non_empty_str(block.get("key")).ok_or(ValidationError::MissingKey { index })?;

        if block_type != "block" {
            continue;
        }
        let children = block
            .get("children")
            .and_then(Value::as_array)
            .ok_or(ValidationError::ChildrenNotArray { index })?;
        for (span, child) in children.iter().enumerate() {
            check_json_span(child, index, span)?;
        }
    }
    Ok(())
}

fn check_json_span(child: &Value, index: usize, span: usize) -> Result<(), ValidationError> {
    non_empty_str(child.get("type")).ok_or(ValidationError::SpanMissingType { index, span })?;
    non_empty_str(child.get("key")).ok_or(ValidationError::SpanMissingKey { index, span })?;
    if !child.get("text").is_some_and(Value::is_string) {
        return Err(ValidationError::SpanTextNotString { index, span });
    }
    Ok(())
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListKind, SeparatorBlock, Span, TextBlock};
    use rstest::rstest;
    use serde_json::json;

    fn span(key: &str) -> Span {
        Span::new(key.to_string(), "t")
    }

    #[test]
    fn test_valid_typed_blocks() {
        let blocks = vec![
            Block::Text(TextBlock::new("a".to_string(), BlockStyle::H3, vec![span("s")])),
            Block::Separator(SeparatorBlock {
                key: "b".to_string(),
            }),
        ];
        assert!(validate(&blocks));
        assert!(validate(&[]));
    }

    #[test]
    fn test_empty_block_key() {
        let blocks = vec![Block::Separator(SeparatorBlock { key: String::new() })];
        assert_eq!(check(&blocks), Err(ValidationError::MissingKey { index: 0 }));
        assert!(!validate(&blocks));
    }

    #[test]
    fn test_empty_span_key() {
        let blocks = vec![Block::Text(TextBlock::new(
            "a".to_string(),
            BlockStyle::Normal,
            vec![span("s"), span("")],
        ))];
        assert_eq!(
            check(&blocks),
            Err(ValidationError::SpanMissingKey { index: 0, span: 1 })
        );
    }

    #[test]
    fn test_heading_level_mismatch() {
        let mut heading = TextBlock::new("a".to_string(), BlockStyle::H2, vec![]);
        heading.level = Some(3);
        assert!(matches!(
            check(&[Block::Text(heading)]),
            Err(ValidationError::HeadingLevelMismatch { style: "h2", .. })
        ));
    }

    #[test]
    fn test_list_item_must_be_normal() {
        let mut item = TextBlock::list_item("a".to_string(), ListKind::Bullet, vec![]);
        item.style = BlockStyle::Blockquote;
        assert!(!validate(&[Block::Text(item)]));
    }

    #[test]
    fn test_valid_json() {
        let value = json!([
            {"type": "block", "key": "a", "style": "normal", "children": [
                {"type": "span", "key": "s", "text": "", "marks": []}
            ]},
            {"type": "separator", "key": "b"},
            {"type": "highlightBlock", "key": "c", "content": [{"type": "block"}]}
        ]);
        assert_eq!(check_json(&value), Ok(()));
    }

    #[rstest]
    #[case(json!({"type": "block"}), ValidationError::NotAnArray)]
    #[case(json!(["x"]), ValidationError::NotAnObject { index: 0 })]
    #[case(json!([{"key": "a"}]), ValidationError::MissingType { index: 0 })]
    #[case(json!([{"type": "", "key": "a"}]), ValidationError::MissingType { index: 0 })]
    #[case(json!([{"type": "separator"}]), ValidationError::MissingKey { index: 0 })]
    #[case(
        json!([{"type": "block", "key": "a", "children": "nope"}]),
        ValidationError::ChildrenNotArray { index: 0 }
    )]
    #[case(
        json!([{"type": "block", "key": "a", "children": [{"key": "s", "text": ""}]}]),
        ValidationError::SpanMissingType { index: 0, span: 0 }
    )]
    #[case(
        json!([{"type": "block", "key": "a", "children": [{"type": "span", "text": ""}]}]),
        ValidationError::SpanMissingKey { index: 0, span: 0 }
    )]
    #[case(
        json!([{"type": "block", "key": "a", "children": [{"type": "span", "key": "s", "text": 3}]}]),
        ValidationError::SpanTextNotString { index: 0, span: 0 }
    )]
    fn test_invalid_json(#[case] value: Value, #[case] expected: ValidationError) {
        assert_eq!(check_json(&value), Err(expected));
        assert!(!validate_json(&value));
    }
}
