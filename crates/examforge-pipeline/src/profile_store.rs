//! Profile stores: a validating JSON document store and a plain in-memory map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::{info, warn};

use examforge_core::errors::{ConfigError, ForgeResult, IssueList, ProfileIssue};
use examforge_core::models::{DifficultyRegistry, Profile, ProfileDocument};
use examforge_core::traits::IProfileStore;
use examforge_core::validation::validate_profile;

enum Source {
    File(PathBuf),
    Inline(String),
}

struct Stored {
    profile: Profile,
    issues: Vec<ProfileIssue>,
}

/// Profiles loaded from a `{"profiles": [...]}` document.
///
/// Every profile is validated on load. Invalid profiles stay listed but
/// `get_profile` refuses them with `ConfigError::InvalidProfile`.
pub struct JsonProfileStore {
    source: Source,
    registry: DifficultyRegistry,
    profiles: RwLock<HashMap<String, Stored>>,
    order: RwLock<Vec<String>>,
}

impl JsonProfileStore {
    pub fn from_file(path: &Path) -> ForgeResult<Self> {
        Self::load(Source::File(path.to_path_buf()), DifficultyRegistry::global().clone())
    }

    pub fn from_json(json: &str) -> ForgeResult<Self> {
        Self::load(Source::Inline(json.to_string()), DifficultyRegistry::global().clone())
    }

    /// Validate against a custom registry instead of the global one.
    pub fn from_json_with_registry(json: &str, registry: DifficultyRegistry) -> ForgeResult<Self> {
        Self::load(Source::Inline(json.to_string()), registry)
    }

    fn load(source: Source, registry: DifficultyRegistry) -> ForgeResult<Self> {
        let store = Self {
            source,
            registry,
            profiles: RwLock::new(HashMap::new()),
            order: RwLock::new(Vec::new()),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the source document and swap in its profiles. Returns how many
    /// loaded. On a parse failure the previous profiles are kept.
    pub fn reload(&self) -> ForgeResult<usize> {
        let (name, text) = match &self.source {
            Source::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseFailed {
                    source_name: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                (path.display().to_string(), text)
            }
            Source::Inline(text) => ("inline profile document".to_string(), text.clone()),
        };
        let document: ProfileDocument =
            serde_json::from_str(&text).map_err(|e| ConfigError::ParseFailed {
                source_name: name.clone(),
                reason: e.to_string(),
            })?;

        let mut profiles = HashMap::with_capacity(document.profiles.len());
        let mut order = Vec::with_capacity(document.profiles.len());
        for profile in document.profiles {
            let issues = validate_profile(&profile, &self.registry).err().unwrap_or_default();
            if !issues.is_empty() {
                warn!(
                    profile_id = %profile.profile_id,
                    issues = %IssueList(issues.clone()),
                    "profile failed validation"
                );
            }
            let id = profile.profile_id.clone();
            if profiles.insert(id.clone(), Stored { profile, issues }).is_some() {
                warn!(profile_id = %id, "duplicate profile id, keeping the last definition");
            } else {
                order.push(id);
            }
        }
        let count = profiles.len();

        *self.profiles.write().unwrap_or_else(PoisonError::into_inner) = profiles;
        *self.order.write().unwrap_or_else(PoisonError::into_inner) = order;
        info!(source = %name, profiles = count, "profiles loaded");
        Ok(count)
    }

    /// Validation issues recorded for a profile at load time.
    pub fn issues(&self, profile_id: &str) -> Option<Vec<ProfileIssue>> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(profile_id)
            .map(|s| s.issues.clone())
    }
}

impl IProfileStore for JsonProfileStore {
    fn get_profile(&self, profile_id: &str) -> ForgeResult<Profile> {
        let profiles = self.profiles.read().unwrap_or_else(PoisonError::into_inner);
        let stored = profiles
            .get(profile_id)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                profile_id: profile_id.to_string(),
            })?;
        if !stored.issues.is_empty() {
            return Err(ConfigError::InvalidProfile {
                profile_id: profile_id.to_string(),
                issues: IssueList(stored.issues.clone()),
            }
            .into());
        }
        Ok(stored.profile.clone())
    }

    fn profile_ids(&self) -> ForgeResult<Vec<String>> {
        Ok(self.order.read().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

/// Unvalidated profiles held in memory. Selection still validates.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: Profile) -> Self {
        self.insert(profile);
        self
    }

    pub fn insert(&self, profile: Profile) {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(profile.profile_id.clone(), profile);
    }
}

impl IProfileStore for InMemoryProfileStore {
    fn get_profile(&self, profile_id: &str) -> ForgeResult<Profile> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(profile_id)
            .cloned()
            .ok_or_else(|| {
                ConfigError::ProfileNotFound {
                    profile_id: profile_id.to_string(),
                }
                .into()
            })
    }

    fn profile_ids(&self) -> ForgeResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        Ok(ids)
    }
}
