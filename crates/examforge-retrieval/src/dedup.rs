//! Word-set Jaccard overlap between retrieved chunks.

use std::collections::HashSet;

use examforge_core::models::RetrievedChunk;

/// Jaccard similarity of the lowercase whitespace-separated word sets.
/// Empty text overlaps nothing.
pub fn text_overlap(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let words_b: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Keep chunks in order, dropping any whose overlap with an already kept
/// chunk exceeds `threshold`. Returns the number dropped.
pub fn dedup_overlapping(chunks: &mut Vec<RetrievedChunk>, threshold: f64) -> usize {
    let before = chunks.len();
    let mut kept: Vec<RetrievedChunk> = Vec::with_capacity(before);
    for chunk in chunks.drain(..) {
        let duplicate = kept.iter().any(|k| {
            k.chunk.id == chunk.chunk.id
                || text_overlap(&k.chunk.text, &chunk.chunk.text) > threshold
        });
        if !duplicate {
            kept.push(chunk);
        }
    }
    *chunks = kept;
    before - chunks.len()
}
