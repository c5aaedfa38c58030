pub mod dedup_config;
pub mod defaults;
pub mod embedding_config;
pub mod generation_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod selection_config;

pub use dedup_config::DedupConfig;
pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use selection_config::SelectionConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ForgeResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub selection: SelectionConfig,
    pub retrieval: RetrievalConfig,
    pub dedup: DedupConfig,
    pub generation: GenerationConfig,
    pub embedding: EmbeddingConfig,
    pub observability: ObservabilityConfig,
}

impl ForgeConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> ForgeResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            ConfigError::ParseFailed {
                source_name: "toml".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> ForgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseFailed {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }
}
