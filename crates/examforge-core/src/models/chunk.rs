use serde::{Deserialize, Serialize};

/// A unit of reference text owned by the external indexing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    pub id: String,
    pub text: String,
    /// Empty until the indexing pipeline fills it in.
    #[serde(default)]
    pub embedding: Vec<f32>,
    /// Source knowledge base.
    pub kb_id: String,
    /// Declared priority of the source knowledge base. Higher wins ties.
    #[serde(default)]
    pub kb_priority: i32,
    /// Position of the chunk within its source document.
    #[serde(default)]
    pub chunk_index: usize,
    /// Priority/outline chunks ("hot topics") are searched in Stage A.
    #[serde(default)]
    pub is_priority: bool,
    /// Domain tag for content chunks.
    #[serde(default)]
    pub domain: Option<String>,
}

/// A chunk paired with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: KnowledgeChunk,
    pub similarity: f64,
}

/// Pre-filter applied by the vector index before ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkFilter {
    /// Only chunks tagged with this domain.
    pub domain: Option<String>,
    /// Only priority (`Some(true)`) or only content (`Some(false)`) chunks.
    pub is_priority: Option<bool>,
}

impl ChunkFilter {
    /// Stage A filter: priority/outline chunks, any domain.
    pub fn priority() -> Self {
        Self {
            domain: None,
            is_priority: Some(true),
        }
    }

    /// Stage B filter: content chunks tagged with `domain`.
    pub fn content(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            is_priority: Some(false),
        }
    }

    pub fn matches(&self, chunk: &KnowledgeChunk) -> bool {
        if let Some(p) = self.is_priority {
            if chunk.is_priority != p {
                return false;
            }
        }
        if let Some(domain) = &self.domain {
            if chunk.domain.as_deref() != Some(domain.as_str()) {
                return false;
            }
        }
        true
    }
}
