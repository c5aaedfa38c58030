//! Constraint Builder: blueprint + profile → structured instruction payload.
//!
//! The question type is always the primary directive. The difficulty level
//! contributes a supporting cognitive-depth hint.

use examforge_core::errors::ConfigError;
use examforge_core::models::{
    Blueprint, ConstraintPayload, DifficultyDirective, DifficultyRegistry, Profile,
    QuestionTypeDirective,
};

/// Builds [`ConstraintPayload`]s against a difficulty registry.
#[derive(Debug, Clone)]
pub struct ConstraintBuilder {
    registry: DifficultyRegistry,
}

impl Default for ConstraintBuilder {
    fn default() -> Self {
        Self::new(DifficultyRegistry::global().clone())
    }
}

impl ConstraintBuilder {
    pub fn new(registry: DifficultyRegistry) -> Self {
        Self { registry }
    }

    /// Pure. Fails if any blueprint field does not resolve.
    pub fn build(
        &self,
        blueprint: &Blueprint,
        profile: &Profile,
    ) -> Result<ConstraintPayload, ConfigError> {
        let level = self
            .registry
            .get(&blueprint.difficulty_level_id)
            .ok_or_else(|| ConfigError::UnknownDifficultyLevel {
                level_id: blueprint.difficulty_level_id.clone(),
            })?;
        let question_type = profile
            .question_type(&blueprint.question_type_id)
            .ok_or_else(|| ConfigError::UnknownQuestionType {
                profile_id: profile.profile_id.clone(),
                question_type_id: blueprint.question_type_id.clone(),
            })?;
        let domain = profile
            .domain(&blueprint.domain_id)
            .ok_or_else(|| ConfigError::UnknownDomain {
                profile_id: profile.profile_id.clone(),
                domain_id: blueprint.domain_id.clone(),
            })?;
        let mode = profile
            .reasoning_mode(&blueprint.reasoning_mode_id)
            .ok_or_else(|| ConfigError::UnknownReasoningMode {
                profile_id: profile.profile_id.clone(),
                reasoning_mode_id: blueprint.reasoning_mode_id.clone(),
            })?;

        let display_name = profile
            .display_name_override(&level.level_id)
            .map(str::to_string)
            .unwrap_or_else(|| level.name.clone());

        Ok(ConstraintPayload {
            primary: QuestionTypeDirective {
                question_type_id: question_type.id.clone(),
                phrase: question_type.phrase.clone(),
                guidance: question_type.guidance.clone(),
            },
            supporting: DifficultyDirective {
                level_id: level.level_id.clone(),
                display_name,
                global_name: level.name.clone(),
                description: level.description.clone(),
                verbs: level.verbs.clone(),
            },
            domain_id: domain.id.clone(),
            domain_name: domain.display_name(),
            reasoning_mode_id: mode.id.clone(),
            reasoning_mode_name: if mode.name.is_empty() {
                mode.id.clone()
            } else {
                mode.name.clone()
            },
            reasoning_mode_description: mode.description.clone(),
            subtopic: None,
        })
    }
}

/// [`ConstraintBuilder::build`] against the global registry.
pub fn build_constraint(
    blueprint: &Blueprint,
    profile: &Profile,
) -> Result<ConstraintPayload, ConfigError> {
    ConstraintBuilder::default().build(blueprint, profile)
}
