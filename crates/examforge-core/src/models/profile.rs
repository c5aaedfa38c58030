//! Exam profile: domains, question types, reasoning modes, difficulty settings.
//!
//! Profiles arrive as loosely structured JSON documents and are deserialized
//! into these records. Structural checks live in [`crate::validation`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::retrieval::RetrievalMode;

/// A subject-matter domain of the exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    /// Display name. Falls back to a title-cased id when empty.
    #[serde(default)]
    pub name: String,
    /// Keywords used for hint detection in request messages.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Declared priority of the domain. Higher is more important.
    #[serde(default)]
    pub priority: i32,
}

impl Domain {
    /// Display name, or the id with underscores replaced and words capitalized.
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        self.id
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A question archetype, tagged with the difficulty level it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionType {
    pub id: String,
    /// Canonical phrasing, e.g. "Which is BEST/MOST appropriate?".
    pub phrase: String,
    #[serde(default)]
    pub guidance: String,
    #[serde(alias = "difficulty_level")]
    pub difficulty_level_id: String,
}

/// A framing lens for the question (governance, risk-based, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningMode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Per-profile difficulty settings layered over the global registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Level ids that may be drawn. Order is the draw order.
    #[serde(default)]
    pub enabled_levels: Vec<String>,
    /// Level id → non-negative weight. Need not sum to 1.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    /// Level id → profile-specific display name.
    #[serde(default)]
    pub display_names: BTreeMap<String, String>,
}

impl DifficultyProfile {
    /// Weight for a level. Levels without an explicit weight weigh zero.
    pub fn weight(&self, level_id: &str) -> f64 {
        self.weights.get(level_id).copied().unwrap_or(0.0)
    }

    /// `(level_id, weight)` pairs restricted to enabled levels, in enabled order.
    /// A level listed twice appears once, at its first position.
    pub fn enabled_weights(&self) -> Vec<(String, f64)> {
        let mut pairs: Vec<(String, f64)> = Vec::with_capacity(self.enabled_levels.len());
        for id in &self.enabled_levels {
            if pairs.iter().all(|(seen, _)| seen != id) {
                pairs.push((id.clone(), self.weight(id)));
            }
        }
        pairs
    }
}

/// An exam profile. Immutable for the duration of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub question_types: Vec<QuestionType>,
    #[serde(default)]
    pub reasoning_modes: Vec<ReasoningMode>,
    #[serde(default, alias = "difficulty_profile")]
    pub difficulty: DifficultyProfile,
    /// Profile-level retrieval mode setting, if any.
    #[serde(default)]
    pub retrieval_mode: Option<RetrievalMode>,
}

impl Profile {
    pub fn domain(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }

    pub fn question_type(&self, id: &str) -> Option<&QuestionType> {
        self.question_types.iter().find(|q| q.id == id)
    }

    pub fn reasoning_mode(&self, id: &str) -> Option<&ReasoningMode> {
        self.reasoning_modes.iter().find(|m| m.id == id)
    }

    /// Question types tagged with the given level, in profile order.
    pub fn question_types_for_level(&self, level_id: &str) -> Vec<&QuestionType> {
        self.question_types
            .iter()
            .filter(|q| q.difficulty_level_id == level_id)
            .collect()
    }

    /// Profile override for a level's display name.
    pub fn display_name_override(&self, level_id: &str) -> Option<&str> {
        self.difficulty
            .display_names
            .get(level_id)
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// A copy of this profile with `enabled_levels` replaced.
    pub fn with_enabled_levels(&self, levels: &[String]) -> Profile {
        let mut profile = self.clone();
        profile.difficulty.enabled_levels = levels.to_vec();
        profile
    }
}

/// Top-level profile document: `{"profiles": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(default)]
    pub profiles: Vec<Profile>,
}
