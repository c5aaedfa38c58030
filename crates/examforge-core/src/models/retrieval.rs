use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::chunk::KnowledgeChunk;
use crate::errors::ConfigError;

/// Which retrieval stages run, and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Stage B only.
    Disabled,
    /// Stage B, enriched by a limited Stage A when short.
    Assistive,
    /// Stage A then Stage B.
    Priority,
}

impl RetrievalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalMode::Disabled => "disabled",
            RetrievalMode::Assistive => "assistive",
            RetrievalMode::Priority => "priority",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" => Ok(RetrievalMode::Disabled),
            "assistive" => Ok(RetrievalMode::Assistive),
            "priority" => Ok(RetrievalMode::Priority),
            other => Err(ConfigError::UnknownRetrievalMode {
                value: other.to_string(),
            }),
        }
    }
}

/// A retrieval pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStage {
    /// Priority/outline chunks.
    StageA,
    /// Domain/content chunks.
    StageB,
}

impl RetrievalStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalStage::StageA => "stage_a",
            RetrievalStage::StageB => "stage_b",
        }
    }
}

/// A chunk in the final retrieval output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub chunk: KnowledgeChunk,
    pub similarity: f64,
    pub stage: RetrievalStage,
}

/// A stage that produced no chunks. Metadata, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalDegradation {
    pub stage: RetrievalStage,
    pub requested: usize,
    pub returned: usize,
    pub reason: String,
}

/// Output of the two-stage retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub mode: RetrievalMode,
    pub chunks: Vec<RetrievedChunk>,
    /// Stages that actually issued a query, in execution order.
    pub stages_run: Vec<RetrievalStage>,
    /// Subtopic extracted from Stage A chunks, if any.
    pub subtopic: Option<String>,
    pub degradations: Vec<RetrievalDegradation>,
}

impl RetrievalResult {
    pub fn empty(mode: RetrievalMode) -> Self {
        Self {
            mode,
            chunks: Vec::new(),
            stages_run: Vec::new(),
            subtopic: None,
            degradations: Vec::new(),
        }
    }

    /// Stages that ran, joined by `+`, e.g. `stage_a+stage_b`.
    pub fn retrieval_path(&self) -> String {
        if self.stages_run.is_empty() {
            return "none".to_string();
        }
        self.stages_run
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Whether any priority/outline chunk made it into the output.
    pub fn hot_topics_used(&self) -> bool {
        self.chunks.iter().any(|c| c.stage == RetrievalStage::StageA)
    }

    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Priority".parse::<RetrievalMode>().unwrap(), RetrievalMode::Priority);
        assert_eq!("off".parse::<RetrievalMode>().unwrap(), RetrievalMode::Disabled);
        assert!("sometimes".parse::<RetrievalMode>().is_err());
    }

    #[test]
    fn retrieval_path_joins_stages() {
        let mut r = RetrievalResult::empty(RetrievalMode::Priority);
        assert_eq!(r.retrieval_path(), "none");
        r.stages_run = vec![RetrievalStage::StageA, RetrievalStage::StageB];
        assert_eq!(r.retrieval_path(), "stage_a+stage_b");
        assert!(!r.hot_topics_used());
    }
}
