//! Semantic Duplicate Detector.
//!
//! Embeds a candidate's signature and compares it with the session's recent
//! accepted signatures. At or above the threshold the candidate is rejected
//! and the cache is left untouched; otherwise it is recorded. A candidate whose
//! text matches a cached signature exactly is rejected at similarity 1.0.

use std::sync::Arc;

use examforge_core::config::DedupConfig;
use examforge_core::errors::ForgeResult;
use examforge_core::models::{DuplicateOutcome, DuplicateVerdict, SignatureEntry};
use examforge_core::traits::{IEmbeddingProvider, ISignatureStore};
use examforge_embeddings::similarity::max_similarity;
use tracing::debug;

/// Check `signature_text` against the last `history_depth` signatures of the
/// session and record it if accepted.
///
/// The embedding is computed before the session is locked; the compare and
/// append run atomically per session.
pub fn check_and_record(
    store: &dyn ISignatureStore,
    session_id: &str,
    signature_text: &str,
    embed_fn: &dyn Fn(&str) -> ForgeResult<Vec<f32>>,
    threshold: f64,
    history_depth: usize,
) -> ForgeResult<DuplicateVerdict> {
    let embedding = embed_fn(signature_text)?;
    let entry = SignatureEntry::new(signature_text, embedding.clone());

    let mut best = 0.0f64;
    let mut compared = 0usize;
    let accepted = store.record_if(
        session_id,
        history_depth,
        entry,
        &mut |cached: &[SignatureEntry]| {
            let embeddings = cached.iter().map(|e| e.embedding.as_slice());
            let (max, n) = max_similarity(&embedding, embeddings);
            compared = n;
            // Identical text is a duplicate even when its vector has no magnitude.
            if cached.iter().any(|e| e.signature_text == signature_text) {
                best = 1.0;
                return false;
            }
            best = max;
            max < threshold
        },
    )?;

    let outcome = if accepted {
        DuplicateOutcome::Accepted
    } else {
        DuplicateOutcome::Rejected
    };
    debug!(
        session_id,
        outcome = ?outcome,
        max_similarity = best,
        compared_against = compared,
        threshold,
        "duplicate check"
    );
    Ok(DuplicateVerdict {
        outcome,
        max_similarity: best,
        compared_against: compared,
    })
}

/// [`check_and_record`] bound to a provider, a store, and dedup settings.
pub struct DuplicateDetector {
    embedder: Arc<dyn IEmbeddingProvider>,
    store: Arc<dyn ISignatureStore>,
    config: DedupConfig,
}

impl DuplicateDetector {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        store: Arc<dyn ISignatureStore>,
        config: DedupConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            config,
        }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// With detection disabled every candidate is accepted and nothing is cached.
    pub fn check_and_record(
        &self,
        session_id: &str,
        signature_text: &str,
    ) -> ForgeResult<DuplicateVerdict> {
        if !self.config.enabled {
            return Ok(DuplicateVerdict {
                outcome: DuplicateOutcome::Accepted,
                max_similarity: 0.0,
                compared_against: 0,
            });
        }
        let embedder = self.embedder.clone();
        check_and_record(
            self.store.as_ref(),
            session_id,
            signature_text,
            &move |text: &str| embedder.embed(text),
            self.config.similarity_threshold,
            self.config.history_depth,
        )
    }

    /// Forget every cached signature for a session.
    pub fn reset(&self, session_id: &str) -> ForgeResult<()> {
        self.store.evict(session_id)
    }
}
