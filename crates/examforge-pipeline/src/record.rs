//! Persistable summary of one generated question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use examforge_core::models::RetrievalMode;

use crate::request::GenerationOutcome;

/// One row's worth of question metadata for the caller to store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub session_id: String,
    pub profile_id: String,
    pub domain_id: String,
    pub difficulty_level_id: String,
    pub difficulty_level_display_name: String,
    pub question_type_id: String,
    pub question_type_phrase: String,
    pub retrieval_mode: RetrievalMode,
    pub retrieval_path: String,
    pub hot_topics_used: bool,
    pub candidate_text: String,
    pub outcome: GenerationOutcome,
    pub created_at: DateTime<Utc>,
}
