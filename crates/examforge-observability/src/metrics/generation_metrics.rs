//! Request outcomes and per-attempt rejection counts.

use serde::{Deserialize, Serialize};

/// Why an attempt's candidate was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Repeat,
    Format,
    ProviderError,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repeat => "rejected_repeat",
            Self::Format => "rejected_format",
            Self::ProviderError => "provider_error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationMetrics {
    pub requests_accepted: u64,
    pub requests_exhausted: u64,
    /// Requests that ended in an error (configuration or storage).
    pub requests_failed: u64,
    pub attempts_total: u64,
    pub rejected_repeat: u64,
    pub rejected_format: u64,
    pub provider_errors: u64,
}

impl GenerationMetrics {
    pub fn record_accepted(&mut self, attempts: u32) {
        self.requests_accepted += 1;
        self.attempts_total += u64::from(attempts);
    }

    pub fn record_exhausted(&mut self, attempts: u32) {
        self.requests_exhausted += 1;
        self.attempts_total += u64::from(attempts);
    }

    pub fn record_failed(&mut self) {
        self.requests_failed += 1;
    }

    pub fn record_rejection(&mut self, reason: RejectionReason) {
        match reason {
            RejectionReason::Repeat => self.rejected_repeat += 1,
            RejectionReason::Format => self.rejected_format += 1,
            RejectionReason::ProviderError => self.provider_errors += 1,
        }
    }

    /// Accepted share of completed (accepted or exhausted) requests.
    pub fn acceptance_rate(&self) -> f64 {
        let completed = self.requests_accepted + self.requests_exhausted;
        if completed == 0 {
            return 0.0;
        }
        self.requests_accepted as f64 / completed as f64
    }

    /// Mean attempts per completed request.
    pub fn avg_attempts(&self) -> f64 {
        let completed = self.requests_accepted + self.requests_exhausted;
        if completed == 0 {
            return 0.0;
        }
        self.attempts_total as f64 / completed as f64
    }
}
