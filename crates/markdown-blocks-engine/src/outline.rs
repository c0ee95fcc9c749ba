//! Heading outline (table of contents) derived from a block sequence.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::Block;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Anchor slug of `text`, see [`slugify`].
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Heading-styled blocks in source order.
pub fn extract_headings(blocks: &[Block]) -> Vec<OutlineEntry> {
    blocks
        .iter()
        .filter_map(Block::as_text)
        .filter(|b| b.style.is_heading())
        .map(|b| {
            let text = b.plain_text();
            OutlineEntry {
                id: slugify(&text),
                level: b.level.or_else(|| b.style.heading_level()).unwrap_or(1),
                text,
            }
        })
        .collect()
}

/// Lowercases, collapses every run of characters outside ASCII letters,
/// ASCII digits and CJK Unified Ideographs into one hyphen, then trims
/// hyphens from both ends.
pub fn slugify(text: &str) -> String {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let separators = SLUG_REGEX
        .get_or_init(|| Regex::new(r"[^a-zA-Z0-9\x{4E00}-\x{9FFF}]+").expect("Invalid slug regex"));
    separators
        .replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
