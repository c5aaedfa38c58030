//! Weighted difficulty-level distribution with LRU bias.
//!
//! Pure functions: weights and recent counts in, probabilities out. The
//! draw takes the uniform sample as an argument so callers control randomness.

use std::collections::HashMap;

/// Normalize weights to probabilities summing to 1.
///
/// Negative and non-finite weights count as zero. If every weight is zero
/// the result is uniform. An empty input yields an empty output.
pub fn normalize_weights(weights: &[(String, f64)]) -> Vec<(String, f64)> {
    if weights.is_empty() {
        return Vec::new();
    }
    let cleaned: Vec<f64> = weights
        .iter()
        .map(|(_, w)| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    let total: f64 = cleaned.iter().sum();
    if total <= 0.0 {
        let p = 1.0 / weights.len() as f64;
        return weights.iter().map(|(id, _)| (id.clone(), p)).collect();
    }
    weights
        .iter()
        .zip(cleaned)
        .map(|((id, _), w)| (id.clone(), w / total))
        .collect()
}

/// Final draw distribution over levels.
///
/// Each normalized weight is multiplied by `1 / (count + 1)` where `count`
/// is the level's occurrences in the recent window, then re-normalized.
/// A zero-weight level stays at zero unless every enabled weight is zero.
pub fn level_distribution(
    weights: &[(String, f64)],
    recent_counts: &HashMap<String, usize>,
) -> Vec<(String, f64)> {
    let normalized = normalize_weights(weights);
    let biased: Vec<(String, f64)> = normalized
        .into_iter()
        .map(|(id, p)| {
            let count = recent_counts.get(&id).copied().unwrap_or(0);
            let bias = 1.0 / (count as f64 + 1.0);
            (id, p * bias)
        })
        .collect();
    normalize_weights(&biased)
}

/// Index drawn from `probabilities` for a uniform sample `u` in `[0, 1)`.
///
/// Cumulative sums plus binary search. Entries with zero probability are
/// never returned while any entry is positive. Returns `None` when empty.
pub fn draw_index(probabilities: &[f64], u: f64) -> Option<usize> {
    if probabilities.is_empty() {
        return None;
    }
    let mut cumulative = Vec::with_capacity(probabilities.len());
    let mut acc = 0.0;
    for p in probabilities {
        acc += p.max(0.0);
        cumulative.push(acc);
    }
    if acc <= 0.0 {
        let i = (u.clamp(0.0, 1.0) * probabilities.len() as f64) as usize;
        return Some(i.min(probabilities.len() - 1));
    }
    let target = u.clamp(0.0, 1.0) * acc;
    let idx = cumulative.partition_point(|c| *c <= target);
    if idx < probabilities.len() {
        return Some(idx);
    }
    // Float rounding at the top end: fall back to the last positive entry.
    probabilities.iter().rposition(|p| *p > 0.0)
}

/// Occurrence counts of each level id in `levels`.
pub fn count_levels<'a, I>(levels: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = HashMap::new();
    for level in levels {
        *counts.entry(level.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn all_zero_weights_are_uniform() {
        let n = normalize_weights(&w(&[("1", 0.0), ("2", 0.0)]));
        assert_eq!(n, w(&[("1", 0.5), ("2", 0.5)]));
    }

    #[test]
    fn disabling_a_level_renormalizes_the_rest() {
        let n = normalize_weights(&w(&[("2", 0.35), ("3", 0.55)]));
        assert!((n[0].1 - 0.35 / 0.90).abs() < 1e-12);
        assert!((n[1].1 - 0.55 / 0.90).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_level_is_never_drawn_with_positive_siblings() {
        let dist = level_distribution(&w(&[("1", 0.0), ("2", 1.0)]), &HashMap::new());
        let probs: Vec<f64> = dist.iter().map(|(_, p)| *p).collect();
        for u in [0.0, 0.25, 0.5, 0.999_999] {
            assert_eq!(draw_index(&probs, u), Some(1));
        }
    }

    #[test]
    fn lru_bias_favours_less_used_levels() {
        let counts = count_levels(["2", "2", "2", "2", "3"]);
        let dist = level_distribution(&w(&[("2", 1.0), ("3", 1.0)]), &counts);
        // 1/5 vs 1/2 before re-normalization.
        assert!((dist[0].1 - (0.2 / 0.7)).abs() < 1e-12);
        assert!((dist[1].1 - (0.5 / 0.7)).abs() < 1e-12);
    }

    #[test]
    fn draw_walks_cumulative_weights() {
        let probs = [0.1, 0.35, 0.55];
        assert_eq!(draw_index(&probs, 0.0), Some(0));
        assert_eq!(draw_index(&probs, 0.09), Some(0));
        assert_eq!(draw_index(&probs, 0.10), Some(1));
        assert_eq!(draw_index(&probs, 0.44), Some(1));
        assert_eq!(draw_index(&probs, 0.46), Some(2));
        assert_eq!(draw_index(&probs, 0.999_999), Some(2));
        assert_eq!(draw_index(&[], 0.5), None);
    }
}
