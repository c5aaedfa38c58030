use crate::errors::ForgeResult;
use crate::models::Profile;

/// Read access to exam profiles.
pub trait IProfileStore: Send + Sync {
    /// Fetch a validated profile. Unknown ids are `ConfigError::ProfileNotFound`.
    fn get_profile(&self, profile_id: &str) -> ForgeResult<Profile>;

    /// Ids of every profile the store holds.
    fn profile_ids(&self) -> ForgeResult<Vec<String>>;
}
