use serde::{Deserialize, Serialize};

use super::constraint::ConstraintPayload;
use super::retrieval::RetrievedChunk;

/// Everything the generation provider receives for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub constraint: ConstraintPayload,
    pub context_chunks: Vec<RetrievedChunk>,
    #[serde(default)]
    pub user_message: Option<String>,
    /// Set on retries after a rejected candidate.
    #[serde(default)]
    pub retry_directive: Option<String>,
    /// 1-based attempt number.
    pub attempt: u32,
}

impl PromptPayload {
    pub fn context_texts(&self) -> Vec<&str> {
        self.context_chunks
            .iter()
            .map(|c| c.chunk.text.as_str())
            .collect()
    }
}

/// Sampling parameters forwarded to the generation provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub format_rule: String,
}
