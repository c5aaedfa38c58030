use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blueprint::Blueprint;

/// One past selection for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub session_id: String,
    pub blueprint: Blueprint,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(session_id: impl Into<String>, blueprint: Blueprint) -> Self {
        Self {
            session_id: session_id.into(),
            blueprint,
            recorded_at: Utc::now(),
        }
    }
}
