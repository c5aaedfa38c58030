//! Content-addressed embedding cache.

pub mod l1_memory;

use std::sync::atomic::{AtomicU64, Ordering};

use examforge_core::errors::ForgeResult;
use examforge_core::traits::IEmbeddingProvider;
use tracing::debug;

pub use l1_memory::L1MemoryCache;

/// blake3 hex digest of the text, used as the cache key.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Wraps a provider with an L1 cache keyed by content hash.
///
/// Cached vectors whose length no longer matches the provider's dimensions
/// are treated as misses and overwritten.
pub struct CachedEmbedder<P> {
    inner: P,
    l1: L1MemoryCache,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: IEmbeddingProvider> CachedEmbedder<P> {
    pub fn new(inner: P, max_entries: u64) -> Self {
        Self {
            inner,
            l1: L1MemoryCache::new(max_entries),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn clear(&self) {
        self.l1.clear();
    }
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for CachedEmbedder<P> {
    fn embed(&self, text: &str) -> ForgeResult<Vec<f32>> {
        let key = content_hash(text);
        if let Some(cached) = self.l1.get(&key) {
            if cached.len() == self.inner.dimensions() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(cached);
            }
            debug!(
                cached_dims = cached.len(),
                expected_dims = self.inner.dimensions(),
                "discarding cached embedding with stale dimensions"
            );
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let embedding = self.inner.embed(text)?;
        self.l1.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
