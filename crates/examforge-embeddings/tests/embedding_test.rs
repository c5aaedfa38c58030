//! Cache behaviour of `CachedEmbedder` over real and scripted providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use examforge_core::errors::{EmbeddingError, ForgeResult};
use examforge_core::traits::IEmbeddingProvider;
use examforge_embeddings::cache::content_hash;
use examforge_embeddings::{cosine_similarity, CachedEmbedder, HashingEmbedder};

/// Counts calls and fails on a sentinel input.
struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

impl IEmbeddingProvider for CountingProvider {
    fn embed(&self, text: &str) -> ForgeResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text == "fail" {
            return Err(EmbeddingError::InferenceFailed {
                reason: "scripted".into(),
            }
            .into());
        }
        Ok(vec![text.len() as f32, 1.0, 0.0])
    }
    fn dimensions(&self) -> usize {
        3
    }
    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn repeated_text_hits_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cached = CachedEmbedder::new(
        CountingProvider {
            calls: calls.clone(),
        },
        100,
    );
    let a = cached.embed("stem text").unwrap();
    let b = cached.embed("stem text").unwrap();
    assert_eq!(a, b);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cached.stats(), (1, 1));
}

#[test]
fn failures_are_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cached = CachedEmbedder::new(
        CountingProvider {
            calls: calls.clone(),
        },
        100,
    );
    assert!(cached.embed("fail").is_err());
    assert!(cached.embed("fail").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn cached_embedder_reports_inner_identity() {
    let cached = CachedEmbedder::new(HashingEmbedder::new(128), 10);
    assert_eq!(cached.dimensions(), 128);
    assert_eq!(cached.name(), "hashing");
    assert!(cached.is_available());
}

#[test]
fn content_hash_is_stable_hex() {
    let h = content_hash("abc");
    assert_eq!(h.len(), 64);
    assert_eq!(h, content_hash("abc"));
    assert_ne!(h, content_hash("abd"));
}

#[test]
fn identical_signatures_are_identical_after_caching() {
    let cached = CachedEmbedder::new(HashingEmbedder::new(256), 100);
    let text = "Which control BEST prevents tailgating?\nCorrect: B";
    let a = cached.embed(text).unwrap();
    let b = cached.embed(text).unwrap();
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-9);
}

#[test]
fn concurrent_embeds_agree() {
    let cached = Arc::new(CachedEmbedder::new(HashingEmbedder::new(64), 100));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cached = cached.clone();
            std::thread::spawn(move || cached.embed("shared text").unwrap())
        })
        .collect();
    let results: Vec<Vec<f32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0]);
    }
}
