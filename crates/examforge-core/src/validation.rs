//! Structural validation of exam profiles against the difficulty registry.
//!
//! Validation collects every issue instead of stopping at the first, so a
//! broken profile document can be fixed in one pass.

use std::collections::HashSet;

use crate::errors::{ConfigError, IssueList, ProfileIssue};
use crate::models::{DifficultyRegistry, Profile};

/// Check a profile. Returns every issue found, in a stable order.
pub fn validate_profile(
    profile: &Profile,
    registry: &DifficultyRegistry,
) -> Result<(), Vec<ProfileIssue>> {
    let mut issues = Vec::new();

    check_unique_ids(
        "domain",
        profile.domains.iter().map(|d| d.id.as_str()),
        &mut issues,
    );
    check_unique_ids(
        "question type",
        profile.question_types.iter().map(|q| q.id.as_str()),
        &mut issues,
    );
    check_unique_ids(
        "reasoning mode",
        profile.reasoning_modes.iter().map(|m| m.id.as_str()),
        &mut issues,
    );
    check_unique_ids(
        "enabled level",
        profile.difficulty.enabled_levels.iter().map(|l| l.as_str()),
        &mut issues,
    );

    if profile.domains.is_empty() {
        issues.push(ProfileIssue::NoDomains);
    }
    if profile.reasoning_modes.is_empty() {
        issues.push(ProfileIssue::NoReasoningModes);
    }

    let difficulty = &profile.difficulty;
    if difficulty.enabled_levels.is_empty() {
        issues.push(ProfileIssue::NoEnabledLevels);
    }

    let mut checked = HashSet::new();
    for level_id in &difficulty.enabled_levels {
        if !checked.insert(level_id.as_str()) {
            continue;
        }
        if !registry.contains(level_id) {
            issues.push(ProfileIssue::UnregisteredLevel {
                level_id: level_id.clone(),
            });
        }
        if profile.question_types_for_level(level_id).is_empty() {
            issues.push(ProfileIssue::LevelWithoutQuestionTypes {
                level_id: level_id.clone(),
            });
        }
    }

    for qt in &profile.question_types {
        if !registry.contains(&qt.difficulty_level_id) {
            issues.push(ProfileIssue::QuestionTypeUnregisteredLevel {
                question_type_id: qt.id.clone(),
                level_id: qt.difficulty_level_id.clone(),
            });
        }
    }

    for (level_id, weight) in &difficulty.weights {
        if !weight.is_finite() || *weight < 0.0 {
            issues.push(ProfileIssue::InvalidWeight {
                level_id: level_id.clone(),
                weight: weight.to_string(),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// [`validate_profile`] folded into a single [`ConfigError::InvalidProfile`].
pub fn ensure_valid(profile: &Profile, registry: &DifficultyRegistry) -> Result<(), ConfigError> {
    validate_profile(profile, registry).map_err(|issues| ConfigError::InvalidProfile {
        profile_id: profile.profile_id.clone(),
        issues: IssueList(issues),
    })
}

fn check_unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ProfileIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(ProfileIssue::DuplicateId {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }
    }
}
