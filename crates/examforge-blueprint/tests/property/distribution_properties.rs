//! Property tests for the weighted level distribution.

use std::collections::HashMap;

use proptest::prelude::*;

use examforge_blueprint::distribution::{draw_index, level_distribution, normalize_weights};

fn weights_strategy() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(0.0f64..10.0, 1..6).prop_map(|ws| {
        ws.into_iter()
            .enumerate()
            .map(|(i, w)| ((i + 1).to_string(), w))
            .collect()
    })
}

proptest! {
    #[test]
    fn distribution_sums_to_one(
        weights in weights_strategy(),
        counts in prop::collection::vec(0usize..6, 6),
    ) {
        let recent: HashMap<String, usize> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| ((i + 1).to_string(), *c))
            .collect();
        let dist = level_distribution(&weights, &recent);
        prop_assert_eq!(dist.len(), weights.len());
        let total: f64 = dist.iter().map(|(_, p)| p).sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(dist.iter().all(|(_, p)| *p >= 0.0));
    }

    #[test]
    fn bias_never_raises_a_used_level_above_unbiased(
        weights in weights_strategy(),
        used in 1usize..6,
    ) {
        let mut recent = HashMap::new();
        recent.insert("1".to_string(), used);
        let base = normalize_weights(&weights);
        let biased = level_distribution(&weights, &recent);
        prop_assert!(biased[0].1 <= base[0].1 + 1e-12);
    }

    #[test]
    fn draw_returns_positive_probability_index(
        weights in weights_strategy(),
        u in 0.0f64..1.0,
    ) {
        let dist = normalize_weights(&weights);
        let probs: Vec<f64> = dist.iter().map(|(_, p)| *p).collect();
        let idx = draw_index(&probs, u).unwrap();
        prop_assert!(idx < probs.len());
        prop_assert!(probs[idx] > 0.0);
    }
}
