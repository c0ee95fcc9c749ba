//! # Conversion Entry Point
//!
//! Markdown text in, flat block sequence out:
//!
//! ```text
//! markdown ──MarkdownParser──▶ Node tree ──lowering──▶ Vec<Block>
//! ```
//!
//! A parse failure aborts the whole conversion with
//! [`ConvertError::ConversionFailed`]. The parser's own message is logged at
//! debug level and not carried in the error; callers that need it should
//! call the parser themselves and use [`convert_ast`].
//!
//! ```rust
//! use markdown_blocks_engine::{convert, Block};
//!
//! let blocks = convert("# Hello").unwrap();
//! assert!(matches!(&blocks[0], Block::Text(b) if b.level == Some(1)));
//! ```

use crate::ast::Node;
use crate::keys::{KeyGenerator, RandomKeys};
use crate::lowering::lower_document;
use crate::models::Block;
use crate::parser::{MarkdownParser, PulldownMarkdownParser};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Markdown conversion failed")]
    ConversionFailed,
}

/// A parser and key generator bundled for repeated conversions.
///
/// Holds no per-conversion state, so one converter can serve concurrent
/// callers as long as its parts are `Sync`.
#[derive(Debug, Default, Clone)]
pub struct Converter<P = PulldownMarkdownParser, K = RandomKeys> {
    parser: P,
    keys: K,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: MarkdownParser, K: KeyGenerator> Converter<P, K> {
    pub fn with_parts(parser: P, keys: K) -> Self {
        Self { parser, keys }
    }

    pub fn convert(&self, markdown: &str) -> Result<Vec<Block>, ConvertError> {
        let root = self.parser.parse(markdown).map_err(|err| {
            log::debug!("discarding parse error: {err}");
            ConvertError::ConversionFailed
        })?;
        let blocks = convert_ast(&root, &self.keys);
        log::trace!(
            "converted {} bytes of markdown into {} blocks",
            markdown.len(),
            blocks.len()
        );
        Ok(blocks)
    }
}

/// Converts with the default parser and random keys.
pub fn convert(markdown: &str) -> Result<Vec<Block>, ConvertError> {
    Converter::new().convert(markdown)
}

/// Lowers an already-parsed tree.
pub fn convert_ast(root: &Node, keys: &dyn KeyGenerator) -> Vec<Block> {
    lower_document(root, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SequentialKeys;
    use crate::parser::ParseError;

    struct FailingParser;

    impl MarkdownParser for FailingParser {
        fn parse(&self, _markdown: &str) -> Result<Node, ParseError> {
            Err(ParseError::Unclosed(1))
        }
    }

    #[test]
    fn test_parse_failure_is_generic() {
        let converter = Converter::with_parts(FailingParser, SequentialKeys::new());
        assert_eq!(
            converter.convert("anything"),
            Err(ConvertError::ConversionFailed)
        );
        assert_eq!(
            ConvertError::ConversionFailed.to_string(),
            "Markdown conversion failed"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), Ok(vec![]));
    }

    #[test]
    fn test_custom_key_generator() {
        let converter =
            Converter::with_parts(PulldownMarkdownParser::new(), || "fixed".to_string());
        let blocks = converter.convert("para").unwrap();
        assert_eq!(blocks[0].key(), "fixed");
    }
}
