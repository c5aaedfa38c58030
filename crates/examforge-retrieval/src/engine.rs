//! TwoStageRetriever: mode-dependent fusion of priority and content searches.
//!
//! - `disabled`: Stage B only.
//! - `assistive`: Stage B, then a limited Stage A when B came back short.
//! - `priority`: Stage A, then Stage B (optionally refined by an outline subtopic).
//!
//! A stage that comes back short of its desired count, finds nothing, or
//! whose index search fails is recorded as a degradation. Zero chunks
//! overall is a valid result.

use std::sync::Arc;

use examforge_core::config::RetrievalConfig;
use examforge_core::constants::STAGE_A_MIN_K;
use examforge_core::errors::ForgeResult;
use examforge_core::models::{
    Blueprint, ChunkFilter, Profile, RetrievalDegradation, RetrievalMode, RetrievalResult,
    RetrievalStage, RetrievedChunk,
};
use examforge_core::traits::{IEmbeddingProvider, IVectorIndex};
use tracing::{debug, warn};

use crate::dedup::dedup_overlapping;
use crate::query::build_query;
use crate::ranking::select_top;
use crate::subtopic::extract_subtopic;

/// Retrieves supporting chunks for a blueprint from a read-only index.
pub struct TwoStageRetriever {
    index: Arc<dyn IVectorIndex>,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: RetrievalConfig,
}

impl TwoStageRetriever {
    pub fn new(
        index: Arc<dyn IVectorIndex>,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Retrieve with a query built from the blueprint and profile.
    pub fn retrieve(
        &self,
        blueprint: &Blueprint,
        profile: &Profile,
        mode: RetrievalMode,
    ) -> ForgeResult<RetrievalResult> {
        let query = build_query(blueprint, profile, None);
        self.retrieve_with_query(&query, blueprint, mode)
    }

    /// Retrieve for an explicit query text. `mode` is already resolved.
    pub fn retrieve_with_query(
        &self,
        query: &str,
        blueprint: &Blueprint,
        mode: RetrievalMode,
    ) -> ForgeResult<RetrievalResult> {
        let query_embedding = self.embedder.embed(query)?;
        let mut result = RetrievalResult::empty(mode);
        let stage_b_filter = ChunkFilter::content(&blueprint.domain_id);
        let k_a = self.config.stage_a_k();
        let k_b = self.config.stage_b_k();
        let desired_b = k_b.min(self.config.min_desired_chunks);

        let mut chunks = match mode {
            RetrievalMode::Disabled => self.run_stage(
                RetrievalStage::StageB,
                &query_embedding,
                k_b,
                desired_b,
                &stage_b_filter,
                &mut result,
            ),
            RetrievalMode::Assistive => {
                let mut chunks = self.run_stage(
                    RetrievalStage::StageB,
                    &query_embedding,
                    k_b,
                    desired_b,
                    &stage_b_filter,
                    &mut result,
                );
                if chunks.len() < self.config.min_desired_chunks {
                    let shortfall = self.config.min_desired_chunks - chunks.len();
                    let k = shortfall.clamp(STAGE_A_MIN_K, k_a);
                    let outline = self.run_stage(
                        RetrievalStage::StageA,
                        &query_embedding,
                        k,
                        k,
                        &ChunkFilter::priority(),
                        &mut result,
                    );
                    result.subtopic = extract_subtopic(&texts(&outline));
                    chunks.extend(outline);
                }
                chunks
            }
            RetrievalMode::Priority => {
                let mut chunks = self.run_stage(
                    RetrievalStage::StageA,
                    &query_embedding,
                    k_a,
                    k_a,
                    &ChunkFilter::priority(),
                    &mut result,
                );
                result.subtopic = extract_subtopic(&texts(&chunks));
                let refined = match (&result.subtopic, self.config.refine_with_subtopic) {
                    (Some(subtopic), true) => {
                        Some(self.embedder.embed(&format!("{query} {subtopic}"))?)
                    }
                    _ => None,
                };
                let content = self.run_stage(
                    RetrievalStage::StageB,
                    refined.as_deref().unwrap_or(&query_embedding[..]),
                    k_b,
                    desired_b,
                    &stage_b_filter,
                    &mut result,
                );
                chunks.extend(content);
                chunks
            }
        };

        let dropped = dedup_overlapping(&mut chunks, self.config.overlap_threshold);
        result.chunks = chunks;

        debug!(
            mode = %mode,
            retrieval_path = %result.retrieval_path(),
            chunks = result.chunks.len(),
            overlap_dropped = dropped,
            hot_topics_used = result.hot_topics_used(),
            "retrieval completed"
        );
        Ok(result)
    }

    /// One search pass. Never fails: an index error, an empty stage, or a
    /// stage returning fewer than `desired` chunks becomes a degradation.
    fn run_stage(
        &self,
        stage: RetrievalStage,
        query: &[f32],
        k: usize,
        desired: usize,
        filter: &ChunkFilter,
        result: &mut RetrievalResult,
    ) -> Vec<RetrievedChunk> {
        result.stages_run.push(stage);
        let (found, reason) = match self.index.search(query, k, filter) {
            Ok(scored) => {
                let candidates = scored.len();
                let kept = select_top(scored, k, self.config.min_similarity);
                let reason = if candidates == 0 {
                    "no matching chunks".to_string()
                } else if kept.is_empty() {
                    format!(
                        "all {candidates} candidates below similarity {}",
                        self.config.min_similarity
                    )
                } else {
                    format!("{} of {desired} desired chunks", kept.len())
                };
                (kept, reason)
            }
            Err(e) => {
                warn!(stage = stage.as_str(), error = %e, "index search failed");
                (Vec::new(), format!("search failed: {e}"))
            }
        };

        if found.is_empty() || found.len() < desired {
            result.degradations.push(RetrievalDegradation {
                stage,
                requested: k,
                returned: found.len(),
                reason,
            });
        }

        found
            .into_iter()
            .map(|s| RetrievedChunk {
                chunk: s.chunk,
                similarity: s.similarity,
                stage,
            })
            .collect()
    }
}

fn texts(chunks: &[RetrievedChunk]) -> Vec<&str> {
    chunks.iter().map(|c| c.chunk.text.as_str()).collect()
}
