use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The structural parameters chosen for one generation request.
///
/// Created once per request and never mutated; regeneration attempts reuse it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub domain_id: String,
    pub question_type_id: String,
    pub difficulty_level_id: String,
    pub reasoning_mode_id: String,
    pub created_at: DateTime<Utc>,
}

impl Blueprint {
    pub fn new(
        domain_id: impl Into<String>,
        question_type_id: impl Into<String>,
        difficulty_level_id: impl Into<String>,
        reasoning_mode_id: impl Into<String>,
    ) -> Self {
        Self {
            domain_id: domain_id.into(),
            question_type_id: question_type_id.into(),
            difficulty_level_id: difficulty_level_id.into(),
            reasoning_mode_id: reasoning_mode_id.into(),
            created_at: Utc::now(),
        }
    }
}
