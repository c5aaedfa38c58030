//! Property tests for cosine similarity and the hashing embedder.

use proptest::prelude::*;

use examforge_core::traits::IEmbeddingProvider;
use examforge_embeddings::{cosine_similarity, HashingEmbedder};

proptest! {
    #[test]
    fn similarity_is_bounded_and_symmetric(
        a in prop::collection::vec(-10.0f32..10.0, 8),
        b in prop::collection::vec(-10.0f32..10.0, 8),
    ) {
        let ab = cosine_similarity(&a, &b);
        let ba = cosine_similarity(&b, &a);
        prop_assert!((-1.0..=1.0).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn embedding_has_configured_dimensions(text in "[a-z]{1,8}( [a-z]{1,8}){0,10}", dims in 8usize..512) {
        let p = HashingEmbedder::new(dims);
        let v = p.embed(&text).unwrap();
        prop_assert_eq!(v.len(), dims);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!((norm - 1.0).abs() < 1e-4 || norm == 0.0);
    }

    #[test]
    fn self_similarity_is_one(text in "[a-z]{2,8}( [a-z]{2,8}){0,10}") {
        let p = HashingEmbedder::new(128);
        let v = p.embed(&text).unwrap();
        prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }
}
