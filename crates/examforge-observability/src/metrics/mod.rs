//! Pipeline counters.
//!
//! [`PipelineMetrics`] owns the per-concern collectors. Callers hold it behind
//! their own lock and take serializable snapshots.

pub mod generation_metrics;
pub mod retrieval_metrics;
pub mod selection_metrics;

pub use generation_metrics::{GenerationMetrics, RejectionReason};
pub use retrieval_metrics::RetrievalMetrics;
pub use selection_metrics::SelectionMetrics;

/// Aggregate of every pipeline collector.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineMetrics {
    pub generation: GenerationMetrics,
    pub selection: SelectionMetrics,
    pub retrieval: RetrievalMetrics,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// JSON form for export.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
