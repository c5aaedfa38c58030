//! Test fixture loader for examforge profiles and knowledge chunks.
//!
//! Fixtures live next to this crate (`crates/test-fixtures/{profiles,knowledge}`)
//! and are found from any crate in the workspace by walking up from
//! `CARGO_MANIFEST_DIR`.

use std::path::PathBuf;

use examforge_core::models::{KnowledgeChunk, Profile, ProfileDocument};
use serde::de::DeserializeOwned;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // From a member crate, walk up to the workspace root.
    while !path.join("crates").join("test-fixtures").join("profiles").exists() {
        if !path.pop() {
            panic!(
                "Could not find crates/test-fixtures from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("crates").join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Raw text of a fixture file.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The profile with `profile_id` from `profiles/<file>`.
pub fn load_profile(file: &str, profile_id: &str) -> Profile {
    let doc: ProfileDocument = load_fixture(&format!("profiles/{file}"));
    doc.profiles
        .into_iter()
        .find(|p| p.profile_id == profile_id)
        .unwrap_or_else(|| panic!("profile {profile_id} not found in profiles/{file}"))
}

/// The standard exam profile used across integration tests.
pub fn security_profile() -> Profile {
    load_profile("security.json", "security_cert")
}

/// Knowledge chunks without embeddings, from `knowledge/<file>`.
pub fn load_chunks(file: &str) -> Vec<KnowledgeChunk> {
    load_fixture(&format!("knowledge/{file}"))
}
