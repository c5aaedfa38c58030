//! # examforge-core
//!
//! Foundation crate for the examforge question engine.
//! Defines profiles, blueprints, knowledge chunks, collaborator traits,
//! errors, config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod validation;

// Re-export the most commonly used types at the crate root.
pub use config::ForgeConfig;
pub use errors::{ConfigError, ForgeError, ForgeResult};
pub use models::{
    Blueprint, DifficultyRegistry, HistoryEntry, KnowledgeChunk, Profile, RetrievalMode,
    RetrievalResult, ScoredChunk,
};
