mod config_error;
mod embedding_error;
mod provider_error;
mod retrieval_error;
mod storage_error;

pub use config_error::{ConfigError, IssueList, ProfileIssue};
pub use embedding_error::EmbeddingError;
pub use provider_error::ProviderError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Top-level error aggregating every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ForgeError {
    /// Configuration failures are fatal for the request and never retried.
    /// Everything else is an attempt-level failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ForgeError::Config(_) | ForgeError::Storage(_))
    }

    /// Short machine-readable tag for the error family.
    pub fn kind(&self) -> &'static str {
        match self {
            ForgeError::Config(_) => "config_error",
            ForgeError::Embedding(_) => "embedding_error",
            ForgeError::Provider(_) => "provider_error",
            ForgeError::Retrieval(_) => "retrieval_error",
            ForgeError::Storage(_) => "storage_error",
            ForgeError::Serialization(_) => "serialization_error",
        }
    }
}
