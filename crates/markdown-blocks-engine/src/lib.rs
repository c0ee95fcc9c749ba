pub mod ast;
pub mod convert;
pub mod keys;
pub mod lowering;
pub mod models;
pub mod outline;
pub mod parser;
pub mod stats;
pub mod validate;

// Re-export key types for easier usage
pub use ast::Node;
pub use convert::{ConvertError, Converter, convert, convert_ast};
pub use keys::{KeyGenerator, RandomKeys, SequentialKeys};
pub use models::*;
pub use outline::{OutlineEntry, extract_headings, slugify};
pub use parser::{MarkdownParser, ParseError, ParseOptions, PulldownMarkdownParser};
pub use stats::{DocumentStats, compute_stats};
pub use validate::{ValidationError, check, check_json, validate, validate_json};
