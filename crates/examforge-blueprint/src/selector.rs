//! Blueprint Selector.
//!
//! Level: weighted draw with LRU bias. Question type: unused-first within the
//! level. Domain and reasoning mode: pure LRU rotation, domain overridable by
//! a hint. Selection and the history append happen under one per-session
//! critical section provided by the history store.

use std::sync::{Mutex, PoisonError};

use examforge_core::config::SelectionConfig;
use examforge_core::constants::MAX_HISTORY_DEPTH;
use examforge_core::errors::{ConfigError, ForgeResult, IssueList, ProfileIssue};
use examforge_core::models::{Blueprint, DifficultyRegistry, HistoryEntry, Profile};
use examforge_core::traits::IHistoryStore;
use examforge_core::validation::ensure_valid;
use tracing::debug;

use crate::distribution::{count_levels, draw_index, level_distribution};
use crate::random::{RandomSource, SeededRandom};
use crate::rotation::{least_frequently_used, least_recently_used};

/// Chooses blueprints for generation requests.
pub struct BlueprintSelector {
    registry: DifficultyRegistry,
    config: SelectionConfig,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl BlueprintSelector {
    pub fn new(config: SelectionConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            registry: DifficultyRegistry::global().clone(),
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Selector with a `StdRng` seeded from `seed`, or from entropy.
    pub fn seeded(config: SelectionConfig, seed: Option<u64>) -> Self {
        Self::new(config, Box::new(SeededRandom::new(seed)))
    }

    pub fn with_registry(mut self, registry: DifficultyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &DifficultyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Fatal preconditions, checked before any state is touched.
    ///
    /// Zero enabled levels and enabled levels without question types get
    /// their own errors; anything else is reported as an invalid profile.
    pub fn check_profile(&self, profile: &Profile) -> Result<(), ConfigError> {
        if profile.difficulty.enabled_levels.is_empty() {
            return Err(ConfigError::NoEnabledLevels {
                profile_id: profile.profile_id.clone(),
            });
        }
        for level_id in &profile.difficulty.enabled_levels {
            if profile.question_types_for_level(level_id).is_empty() {
                return Err(ConfigError::LevelWithoutQuestionTypes {
                    profile_id: profile.profile_id.clone(),
                    level_id: level_id.clone(),
                });
            }
        }
        ensure_valid(profile, &self.registry)
    }

    /// Select a blueprint for `session_id` and append it to the session history.
    ///
    /// `history_depth` is the number of recent entries consulted for bias and
    /// rotation. The append happens exactly once, before the caller does any
    /// downstream work, so failed generations still count toward rotation.
    pub fn select_blueprint(
        &self,
        session_id: &str,
        profile: &Profile,
        history_depth: usize,
        domain_hint: Option<&str>,
        history: &dyn IHistoryStore,
    ) -> ForgeResult<Blueprint> {
        self.check_profile(profile)?;
        if let Some(hint) = domain_hint {
            if profile.domain(hint).is_none() {
                return Err(ConfigError::UnknownDomain {
                    profile_id: profile.profile_id.clone(),
                    domain_id: hint.to_string(),
                }
                .into());
            }
        }

        let window = history_depth.min(MAX_HISTORY_DEPTH);
        let max_entries = self.config.retained_depth().max(window);
        let entry = history.select_and_append(
            session_id,
            window,
            max_entries,
            &mut |recent: &[HistoryEntry]| self.choose(profile, recent, domain_hint),
        )?;

        debug!(
            session_id,
            domain = %entry.blueprint.domain_id,
            level = %entry.blueprint.difficulty_level_id,
            question_type = %entry.blueprint.question_type_id,
            reasoning_mode = %entry.blueprint.reasoning_mode_id,
            "blueprint selected"
        );
        Ok(entry.blueprint)
    }

    /// Pure selection over an explicit history window (oldest first).
    pub fn choose(
        &self,
        profile: &Profile,
        recent: &[HistoryEntry],
        domain_hint: Option<&str>,
    ) -> ForgeResult<Blueprint> {
        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng: &mut dyn RandomSource = &mut **guard;

        // Level.
        let counts = count_levels(
            recent
                .iter()
                .map(|e| e.blueprint.difficulty_level_id.as_str()),
        );
        let distribution = level_distribution(&profile.difficulty.enabled_weights(), &counts);
        let probabilities: Vec<f64> = distribution.iter().map(|(_, p)| *p).collect();
        let level_idx = draw_index(&probabilities, rng.next_unit()).ok_or_else(|| {
            ConfigError::NoEnabledLevels {
                profile_id: profile.profile_id.clone(),
            }
        })?;
        let level_id = distribution[level_idx].0.clone();

        // Question type within the level.
        let type_ids: Vec<&str> = profile
            .question_types_for_level(&level_id)
            .into_iter()
            .map(|q| q.id.as_str())
            .collect();
        let recent_types: Vec<&str> = recent
            .iter()
            .map(|e| e.blueprint.question_type_id.as_str())
            .collect();
        let question_type_id = least_frequently_used(&type_ids, &recent_types, rng)
            .ok_or_else(|| ConfigError::LevelWithoutQuestionTypes {
                profile_id: profile.profile_id.clone(),
                level_id: level_id.clone(),
            })?
            .to_string();

        // Domain: hint overrides rotation.
        let domain_id = match domain_hint {
            Some(hint) => hint.to_string(),
            None => {
                let ids: Vec<&str> = profile.domains.iter().map(|d| d.id.as_str()).collect();
                let recent_domains: Vec<&str> =
                    recent.iter().map(|e| e.blueprint.domain_id.as_str()).collect();
                least_recently_used(&ids, &recent_domains, rng)
                    .ok_or_else(|| invalid(profile, ProfileIssue::NoDomains))?
                    .to_string()
            }
        };

        // Reasoning mode.
        let mode_ids: Vec<&str> = profile
            .reasoning_modes
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        let recent_modes: Vec<&str> = recent
            .iter()
            .map(|e| e.blueprint.reasoning_mode_id.as_str())
            .collect();
        let reasoning_mode_id = least_recently_used(&mode_ids, &recent_modes, rng)
            .ok_or_else(|| invalid(profile, ProfileIssue::NoReasoningModes))?
            .to_string();

        Ok(Blueprint::new(
            domain_id,
            question_type_id,
            level_id,
            reasoning_mode_id,
        ))
    }
}

fn invalid(profile: &Profile, issue: ProfileIssue) -> ConfigError {
    ConfigError::InvalidProfile {
        profile_id: profile.profile_id.clone(),
        issues: IssueList(vec![issue]),
    }
}
