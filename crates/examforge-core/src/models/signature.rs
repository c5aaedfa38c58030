use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached signature embedding for a previously accepted candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub signature_text: String,
    pub embedding: Vec<f32>,
    pub recorded_at: DateTime<Utc>,
}

impl SignatureEntry {
    pub fn new(signature_text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            signature_text: signature_text.into(),
            embedding,
            recorded_at: Utc::now(),
        }
    }
}

/// Accept/reject decision of the duplicate detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateOutcome {
    Accepted,
    Rejected,
}

/// Outcome plus the evidence it was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateVerdict {
    pub outcome: DuplicateOutcome,
    /// Highest cosine similarity against the cached window (0.0 when empty).
    pub max_similarity: f64,
    /// Number of cached signatures compared against.
    pub compared_against: usize,
}

impl DuplicateVerdict {
    pub fn is_accepted(&self) -> bool {
        self.outcome == DuplicateOutcome::Accepted
    }
}
