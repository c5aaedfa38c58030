use serde::{Deserialize, Serialize};

use super::defaults;

/// Generation attempt loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Maximum generation attempts per request (R).
    pub max_attempts: u32,
    /// Output format rule: "none", "multiple_choice", "yes_no", "numeric".
    pub format_rule: String,
    /// Sampling temperature passed to the generation provider.
    pub temperature: f64,
    /// Output token cap passed to the generation provider.
    pub max_output_tokens: u32,
    /// Seed for the selection random source. `None` seeds from entropy.
    pub random_seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            format_rule: defaults::DEFAULT_FORMAT_RULE.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
            max_output_tokens: defaults::DEFAULT_MAX_OUTPUT_TOKENS,
            random_seed: None,
        }
    }
}
