//! Aggregate counts over a block sequence.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Block;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total_blocks: usize,
    /// Histogram by `type` discriminant; values sum to `total_blocks`.
    pub block_type_counts: BTreeMap<String, usize>,
    pub heading_count: usize,
    pub code_block_count: usize,
    pub image_count: usize,
    pub table_count: usize,
}

pub fn compute_stats(blocks: &[Block]) -> DocumentStats {
    let mut stats = DocumentStats {
        total_blocks: blocks.len(),
        ..DocumentStats::default()
    };
    for block in blocks {
        *stats
            .block_type_counts
            .entry(block.type_name().to_string())
            .or_default() += 1;
        match block {
            Block::Text(text) if text.style.is_heading() => stats.heading_count += 1,
            Block::Code(_) => stats.code_block_count += 1,
            Block::Image(_) => stats.image_count += 1,
            Block::Table(_) => stats.table_count += 1,
            _ => {}
        }
    }
    stats
}
