//! Request and response types for the orchestrator.

use serde::{Deserialize, Serialize};

use examforge_core::models::{RetrievalDegradation, RetrievalMode};

use crate::attempt::AttemptRecord;
use crate::record::QuestionRecord;

/// One generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub session_id: String,
    pub profile_id: String,
    /// Explicit per-request retrieval mode; highest precedence.
    #[serde(default)]
    pub retrieval_mode: Option<RetrievalMode>,
    /// Retrieval mode configured for the calling agent.
    #[serde(default)]
    pub agent_mode: Option<RetrievalMode>,
    /// Explicit domain; overrides detection and rotation.
    #[serde(default)]
    pub domain_hint: Option<String>,
    /// Replaces the profile's enabled levels for this request.
    #[serde(default)]
    pub enabled_levels: Option<Vec<String>>,
    /// Free-text message from the user; feeds the retrieval query and domain detection.
    #[serde(default)]
    pub user_message: Option<String>,
}

impl GenerationRequest {
    pub fn new(session_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            profile_id: profile_id.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: RetrievalMode) -> Self {
        self.retrieval_mode = Some(mode);
        self
    }

    pub fn with_agent_mode(mut self, mode: RetrievalMode) -> Self {
        self.agent_mode = Some(mode);
        self
    }

    pub fn with_domain(mut self, domain_id: impl Into<String>) -> Self {
        self.domain_hint = Some(domain_id.into());
        self
    }

    pub fn with_enabled_levels(mut self, levels: &[&str]) -> Self {
        self.enabled_levels = Some(levels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }
}

/// How the request ended. `Exhausted` still carries the last candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOutcome {
    Accepted,
    Exhausted,
}

/// Caller-facing view of the selected blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintSummary {
    pub domain: String,
    pub question_type_id: String,
    pub question_type_phrase: String,
    pub difficulty_level_id: String,
    pub difficulty_level_display_name: String,
    pub difficulty_level_global_name: String,
    pub reasoning_mode: String,
}

/// Result of a completed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub blueprint: BlueprintSummary,
    pub retrieval_mode: RetrievalMode,
    pub retrieval_path: String,
    pub hot_topics_used: bool,
    pub subtopic: Option<String>,
    pub degradations: Vec<RetrievalDegradation>,
    pub candidate_text: String,
    pub outcome: GenerationOutcome,
    /// Set when no attempt was accepted; `candidate_text` is then a repeat or
    /// malformed and must not be presented as a clean result.
    pub exhausted: bool,
    pub attempts: Vec<AttemptRecord>,
    pub record: QuestionRecord,
}

impl GenerationOutput {
    pub fn is_accepted(&self) -> bool {
        self.outcome == GenerationOutcome::Accepted
    }
}
