use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{STAGE_A_MAX_K, STAGE_A_MIN_K, STAGE_B_MAX_K, STAGE_B_MIN_K};
use crate::errors::ConfigError;
use crate::models::RetrievalMode;

/// Two-stage retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Top-K for the priority/outline pass. Clamped to [1, 2].
    pub stage_a_top_k: usize,
    /// Top-K for the domain/content pass. Clamped to [2, 4].
    pub stage_b_top_k: usize,
    /// Below this many Stage B chunks, assistive mode enriches with Stage A.
    pub min_desired_chunks: usize,
    /// Minimum cosine similarity for a chunk to be kept.
    pub min_similarity: f64,
    /// Word-set Jaccard overlap above which a later chunk is dropped.
    pub overlap_threshold: f64,
    /// Refine the Stage B query with a subtopic extracted from Stage A chunks.
    pub refine_with_subtopic: bool,
    /// System-wide default mode: "disabled", "assistive", "priority".
    pub default_mode: String,
}

impl RetrievalConfig {
    pub fn stage_a_k(&self) -> usize {
        self.stage_a_top_k.clamp(STAGE_A_MIN_K, STAGE_A_MAX_K)
    }

    pub fn stage_b_k(&self) -> usize {
        self.stage_b_top_k.clamp(STAGE_B_MIN_K, STAGE_B_MAX_K)
    }

    /// The system default mode, parsed.
    pub fn default_mode(&self) -> Result<RetrievalMode, ConfigError> {
        self.default_mode.parse()
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            stage_a_top_k: defaults::DEFAULT_STAGE_A_TOP_K,
            stage_b_top_k: defaults::DEFAULT_STAGE_B_TOP_K,
            min_desired_chunks: defaults::DEFAULT_MIN_DESIRED_CHUNKS,
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            overlap_threshold: defaults::DEFAULT_OVERLAP_THRESHOLD,
            refine_with_subtopic: defaults::DEFAULT_REFINE_WITH_SUBTOPIC,
            default_mode: defaults::DEFAULT_RETRIEVAL_MODE.to_string(),
        }
    }
}
