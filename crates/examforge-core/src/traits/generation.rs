use crate::errors::ForgeResult;
use crate::models::{GenerationParams, PromptPayload};

/// Text generation provider. Timeouts are the implementation's responsibility
/// and surface as `ProviderError::Timeout`.
pub trait IGenerationProvider: Send + Sync {
    fn generate(&self, prompt: &PromptPayload, params: &GenerationParams) -> ForgeResult<String>;

    fn name(&self) -> &str;
}
