//! In-memory vector index with snapshot swap.
//!
//! Readers clone the current `Arc` snapshot under a short read lock and
//! search it without holding the lock. Writers build a new vector and swap
//! it in, so in-flight searches never observe a partial write.

use std::sync::{Arc, RwLock};

use examforge_core::errors::{ForgeResult, RetrievalError};
use examforge_core::models::{ChunkFilter, KnowledgeChunk, ScoredChunk};
use examforge_core::traits::{IEmbeddingProvider, IVectorIndex};
use examforge_embeddings::cosine_similarity;
use tracing::debug;

use crate::ranking::order_scored;

/// Brute-force cosine index over an immutable snapshot of chunks.
#[derive(Default)]
pub struct InMemoryVectorIndex {
    snapshot: RwLock<Arc<Vec<KnowledgeChunk>>>,
}

impl InMemoryVectorIndex {
    pub fn new(chunks: Vec<KnowledgeChunk>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(chunks)),
        }
    }

    /// Index `chunks`, embedding any that arrive without a vector.
    pub fn build(
        mut chunks: Vec<KnowledgeChunk>,
        embedder: &dyn IEmbeddingProvider,
    ) -> ForgeResult<Self> {
        let missing: Vec<usize> = chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.embedding.is_empty())
            .map(|(i, _)| i)
            .collect();
        if !missing.is_empty() {
            let texts: Vec<String> = missing.iter().map(|&i| chunks[i].text.clone()).collect();
            let vectors = embedder.embed_batch(&texts)?;
            for (i, vector) in missing.into_iter().zip(vectors) {
                chunks[i].embedding = vector;
            }
        }
        Ok(Self::new(chunks))
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> ForgeResult<Arc<Vec<KnowledgeChunk>>> {
        let guard = self.snapshot.read().map_err(|e| RetrievalError::SnapshotUnavailable {
            reason: e.to_string(),
        })?;
        Ok(Arc::clone(&guard))
    }

    /// Swap in a new chunk set.
    pub fn replace(&self, chunks: Vec<KnowledgeChunk>) -> ForgeResult<()> {
        let next = Arc::new(chunks);
        let mut guard = self.snapshot.write().map_err(|e| RetrievalError::SnapshotUnavailable {
            reason: e.to_string(),
        })?;
        *guard = next;
        Ok(())
    }

    /// Copy-on-write append. Chunks with an existing id are replaced.
    pub fn upsert(&self, chunks: Vec<KnowledgeChunk>) -> ForgeResult<()> {
        let mut guard = self.snapshot.write().map_err(|e| RetrievalError::SnapshotUnavailable {
            reason: e.to_string(),
        })?;
        let mut next: Vec<KnowledgeChunk> = guard.as_ref().clone();
        for chunk in chunks {
            match next.iter_mut().find(|c| c.id == chunk.id) {
                Some(existing) => *existing = chunk,
                None => next.push(chunk),
            }
        }
        *guard = Arc::new(next);
        Ok(())
    }
}

impl IVectorIndex for InMemoryVectorIndex {
    fn search(
        &self,
        query: &[f32],
        k: usize,
        filter: &ChunkFilter,
    ) -> ForgeResult<Vec<ScoredChunk>> {
        let snapshot = self.snapshot()?;
        let mut scored: Vec<ScoredChunk> = snapshot
            .iter()
            .filter(|c| filter.matches(c))
            .filter(|c| c.embedding.len() == query.len())
            .map(|c| ScoredChunk {
                similarity: cosine_similarity(query, &c.embedding),
                chunk: c.clone(),
            })
            .collect();
        order_scored(&mut scored);
        scored.truncate(k);
        debug!(k, returned = scored.len(), indexed = snapshot.len(), "index search");
        Ok(scored)
    }

    fn len(&self) -> usize {
        self.snapshot().map(|s| s.len()).unwrap_or(0)
    }
}
