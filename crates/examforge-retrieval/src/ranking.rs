//! Deterministic ordering of scored chunks.

use std::cmp::Ordering;

use examforge_core::models::ScoredChunk;

/// Similarity descending, then source-KB priority descending, then original
/// chunk index ascending, then chunk id.
pub fn compare_scored(a: &ScoredChunk, b: &ScoredChunk) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| b.chunk.kb_priority.cmp(&a.chunk.kb_priority))
        .then_with(|| a.chunk.chunk_index.cmp(&b.chunk.chunk_index))
        .then_with(|| a.chunk.id.cmp(&b.chunk.id))
}

pub fn order_scored(chunks: &mut [ScoredChunk]) {
    chunks.sort_by(compare_scored);
}

/// Drop chunks below `min_similarity`, order the rest, keep at most `k`.
pub fn select_top(
    mut chunks: Vec<ScoredChunk>,
    k: usize,
    min_similarity: f64,
) -> Vec<ScoredChunk> {
    chunks.retain(|c| c.similarity >= min_similarity);
    order_scored(&mut chunks);
    chunks.truncate(k);
    chunks
}
