/// Generation provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("provider {provider} timed out after {elapsed_ms}ms")]
    Timeout { provider: String, elapsed_ms: u64 },

    #[error("provider {provider} returned an empty response")]
    EmptyResponse { provider: String },

    #[error("provider {provider} rate limited")]
    RateLimited { provider: String },
}
