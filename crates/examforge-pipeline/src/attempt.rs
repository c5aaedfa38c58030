//! Generation attempt states and per-attempt records.

use serde::{Deserialize, Serialize};

use crate::format::{FormatRule, FormatViolation};

/// States of one generation request.
///
/// `Init → BlueprintSelected → Retrieved → Generated`, then one of the
/// attempt outcomes. Rejections and generation failures loop back to
/// `Generated`; running out of attempts ends in `Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptState {
    Init,
    BlueprintSelected,
    Retrieved,
    Generated,
    Accepted,
    RejectedRepeat,
    RejectedFormat,
    /// The provider or the signature embedding failed for this attempt.
    GenerationFailed,
    Exhausted,
}

impl AttemptState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::BlueprintSelected => "BLUEPRINT_SELECTED",
            Self::Retrieved => "RETRIEVED",
            Self::Generated => "GENERATED",
            Self::Accepted => "ACCEPTED",
            Self::RejectedRepeat => "REJECTED_REPEAT",
            Self::RejectedFormat => "REJECTED_FORMAT",
            Self::GenerationFailed => "GENERATION_FAILED",
            Self::Exhausted => "EXHAUSTED",
        }
    }

    /// Whether this outcome sends the loop back for another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RejectedRepeat | Self::RejectedFormat | Self::GenerationFailed
        )
    }

    /// Legal transitions of the state machine.
    pub fn can_transition_to(&self, next: AttemptState) -> bool {
        use AttemptState::*;
        matches!(
            (self, next),
            (Init, BlueprintSelected)
                | (BlueprintSelected, Retrieved)
                | (Retrieved, Generated)
                | (Generated, Accepted)
                | (Generated, RejectedRepeat)
                | (Generated, RejectedFormat)
                | (Generated, GenerationFailed)
                | (RejectedRepeat | RejectedFormat | GenerationFailed, Generated)
                | (RejectedRepeat | RejectedFormat | GenerationFailed, Exhausted)
        )
    }
}

/// What happened on one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based.
    pub attempt: u32,
    pub state: AttemptState,
    /// Highest similarity against the session cache, when dedup ran.
    pub max_similarity: Option<f64>,
    /// Format violation or error message, when the attempt was not accepted.
    pub detail: Option<String>,
}

impl AttemptRecord {
    pub fn accepted(attempt: u32, max_similarity: f64) -> Self {
        Self {
            attempt,
            state: AttemptState::Accepted,
            max_similarity: Some(max_similarity),
            detail: None,
        }
    }

    pub fn repeat(attempt: u32, max_similarity: f64) -> Self {
        Self {
            attempt,
            state: AttemptState::RejectedRepeat,
            max_similarity: Some(max_similarity),
            detail: None,
        }
    }

    pub fn format(attempt: u32, violation: &FormatViolation) -> Self {
        Self {
            attempt,
            state: AttemptState::RejectedFormat,
            max_similarity: None,
            detail: Some(violation.to_string()),
        }
    }

    pub fn failed(attempt: u32, error: impl ToString) -> Self {
        Self {
            attempt,
            state: AttemptState::GenerationFailed,
            max_similarity: None,
            detail: Some(error.to_string()),
        }
    }
}

/// Directive attached to the next prompt after a repeat rejection.
pub fn repeat_directive(max_similarity: f64) -> String {
    format!(
        "The previous question was too similar to one already asked in this session \
         (similarity {max_similarity:.2}). Use a different reasoning approach and test a \
         different aspect of the topic."
    )
}

/// Directive attached to the next prompt after a format rejection.
pub fn format_directive(rule: FormatRule, violation: &FormatViolation) -> String {
    format!(
        "The previous output did not follow the required {rule} format ({violation}). \
         Follow the format exactly."
    )
}
