//! Global difficulty level registry.
//!
//! Canonical, process-wide, read-only. Profiles reference levels by id and
//! may override display names, but the definitions live here. The standard
//! registry ships three Bloom-style levels; more can be registered at build time.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A canonical difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDifficultyLevel {
    pub level_id: String,
    pub name: String,
    /// Cognitive verbs characteristic of the level.
    pub verbs: Vec<String>,
    pub description: String,
}

impl GlobalDifficultyLevel {
    pub fn new(level_id: &str, name: &str, verbs: &[&str], description: &str) -> Self {
        Self {
            level_id: level_id.to_string(),
            name: name.to_string(),
            verbs: verbs.iter().map(|v| v.to_string()).collect(),
            description: description.to_string(),
        }
    }
}

/// Ordered registry of difficulty levels keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRegistry {
    levels: Vec<GlobalDifficultyLevel>,
}

static GLOBAL_REGISTRY: OnceLock<DifficultyRegistry> = OnceLock::new();

impl DifficultyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three standard levels: recall, application, evaluation.
    pub fn standard() -> Self {
        Self::new()
            .with_level(GlobalDifficultyLevel::new(
                "1",
                "Recall / Understanding",
                &["define", "identify", "recognize", "list", "state"],
                "Tests memorization and recognition of facts, terms, concepts, and basic definitions.",
            ))
            .with_level(GlobalDifficultyLevel::new(
                "2",
                "Application / Analysis",
                &["apply", "analyze", "determine", "troubleshoot", "classify"],
                "Tests ability to apply knowledge to realistic scenarios and analyze situations.",
            ))
            .with_level(GlobalDifficultyLevel::new(
                "3",
                "Evaluation / Judgment",
                &["prioritize", "evaluate", "choose best", "decide first", "justify"],
                "Tests ability to evaluate options and make professional judgments.",
            ))
    }

    /// Process-wide registry, initialized with the standard levels on first use.
    pub fn global() -> &'static DifficultyRegistry {
        GLOBAL_REGISTRY.get_or_init(DifficultyRegistry::standard)
    }

    /// Add or replace a level. Replacement keeps the original position.
    pub fn with_level(mut self, level: GlobalDifficultyLevel) -> Self {
        match self.levels.iter_mut().find(|l| l.level_id == level.level_id) {
            Some(existing) => *existing = level,
            None => self.levels.push(level),
        }
        self
    }

    pub fn get(&self, level_id: &str) -> Option<&GlobalDifficultyLevel> {
        self.levels.iter().find(|l| l.level_id == level_id)
    }

    pub fn contains(&self, level_id: &str) -> bool {
        self.get(level_id).is_some()
    }

    pub fn level_ids(&self) -> Vec<&str> {
        self.levels.iter().map(|l| l.level_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_three_ordered_levels() {
        let reg = DifficultyRegistry::standard();
        assert_eq!(reg.level_ids(), vec!["1", "2", "3"]);
        assert_eq!(reg.get("3").unwrap().name, "Evaluation / Judgment");
    }

    #[test]
    fn registry_is_extensible() {
        let reg = DifficultyRegistry::standard().with_level(GlobalDifficultyLevel::new(
            "4",
            "Synthesis",
            &["design", "compose"],
            "Tests ability to combine concepts into new solutions.",
        ));
        assert_eq!(reg.len(), 4);
        assert!(reg.contains("4"));
    }

    #[test]
    fn replacing_a_level_keeps_position() {
        let reg = DifficultyRegistry::standard().with_level(GlobalDifficultyLevel::new(
            "2",
            "Applied",
            &["apply"],
            "Replaced.",
        ));
        assert_eq!(reg.level_ids(), vec!["1", "2", "3"]);
        assert_eq!(reg.get("2").unwrap().name, "Applied");
    }
}
