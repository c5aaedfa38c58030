//! Per-level and per-domain selection counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionMetrics {
    pub total: u64,
    pub per_level: BTreeMap<String, u64>,
    pub per_domain: BTreeMap<String, u64>,
}

impl SelectionMetrics {
    pub fn record(&mut self, difficulty_level_id: &str, domain_id: &str) {
        self.total += 1;
        *self.per_level.entry(difficulty_level_id.to_string()).or_default() += 1;
        *self.per_domain.entry(domain_id.to_string()).or_default() += 1;
    }

    /// Observed share of selections at a level.
    pub fn level_share(&self, difficulty_level_id: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.per_level.get(difficulty_level_id).copied().unwrap_or(0) as f64 / self.total as f64
    }
}
