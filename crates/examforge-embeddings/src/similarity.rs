//! Cosine similarity over `f32` embeddings, accumulated in `f64`.

/// Cosine similarity between two vectors.
/// Returns 0.0 for mismatched lengths and zero-length or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Highest similarity of `query` against any of `candidates`, with the count
/// of candidates actually compared. Candidates of a different dimension are skipped.
pub fn max_similarity<'a, I>(query: &[f32], candidates: I) -> (f64, usize)
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut best = 0.0f64;
    let mut compared = 0usize;
    for candidate in candidates {
        if candidate.len() != query.len() {
            continue;
        }
        compared += 1;
        best = best.max(cosine_similarity(query, candidate));
    }
    (best, compared)
}
