use serde::{Deserialize, Serialize};

use super::defaults;

/// Semantic duplicate detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Whether candidates are checked against the session's signature cache.
    pub enabled: bool,
    /// Cosine similarity at or above which a candidate is a repeat.
    pub similarity_threshold: f64,
    /// Number of accepted signatures kept per session.
    pub history_depth: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_DEDUP_ENABLED,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            history_depth: defaults::DEFAULT_DEDUP_HISTORY_DEPTH,
        }
    }
}
