//! Retrieval path counts and degradation totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub total: u64,
    /// Keyed by retrieval path, e.g. `stage_a+stage_b`.
    pub per_path: BTreeMap<String, u64>,
    pub hot_topics_used: u64,
    pub degraded: u64,
}

impl RetrievalMetrics {
    pub fn record(&mut self, retrieval_path: &str, hot_topics_used: bool, degraded: bool) {
        self.total += 1;
        *self.per_path.entry(retrieval_path.to_string()).or_default() += 1;
        if hot_topics_used {
            self.hot_topics_used += 1;
        }
        if degraded {
            self.degraded += 1;
        }
    }

    pub fn degradation_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.degraded as f64 / self.total as f64
    }
}
