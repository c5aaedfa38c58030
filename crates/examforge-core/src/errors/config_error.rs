use std::fmt;

/// A single structural problem found while validating a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileIssue {
    #[error("no difficulty levels are enabled")]
    NoEnabledLevels,

    #[error("enabled difficulty level {level_id} has no question types")]
    LevelWithoutQuestionTypes { level_id: String },

    #[error("difficulty level {level_id} is not registered globally")]
    UnregisteredLevel { level_id: String },

    #[error("question type {question_type_id} references unregistered difficulty level {level_id}")]
    QuestionTypeUnregisteredLevel {
        question_type_id: String,
        level_id: String,
    },

    #[error("difficulty weight for level {level_id} is negative or not finite: {weight}")]
    InvalidWeight { level_id: String, weight: String },

    #[error("profile defines no domains")]
    NoDomains,

    #[error("profile defines no reasoning modes")]
    NoReasoningModes,

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: String, id: String },
}

/// Wrapper that renders a list of issues as a `; `-separated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueList(pub Vec<ProfileIssue>);

impl fmt::Display for IssueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

/// Configuration and profile errors. Always fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("profile {profile_id}: no difficulty levels are enabled")]
    NoEnabledLevels { profile_id: String },

    #[error("profile {profile_id}: enabled difficulty level {level_id} has no question types")]
    LevelWithoutQuestionTypes {
        profile_id: String,
        level_id: String,
    },

    #[error("difficulty level {level_id} is not registered globally")]
    UnknownDifficultyLevel { level_id: String },

    #[error("profile {profile_id}: unknown domain {domain_id}")]
    UnknownDomain {
        profile_id: String,
        domain_id: String,
    },

    #[error("profile {profile_id}: unknown question type {question_type_id}")]
    UnknownQuestionType {
        profile_id: String,
        question_type_id: String,
    },

    #[error("profile {profile_id}: unknown reasoning mode {reasoning_mode_id}")]
    UnknownReasoningMode {
        profile_id: String,
        reasoning_mode_id: String,
    },

    #[error("profile not found: {profile_id}")]
    ProfileNotFound { profile_id: String },

    #[error("profile {profile_id} is invalid: {issues}")]
    InvalidProfile {
        profile_id: String,
        issues: IssueList,
    },

    #[error("unknown retrieval mode: {value}")]
    UnknownRetrievalMode { value: String },

    #[error("unknown format rule: {value}")]
    UnknownFormatRule { value: String },

    #[error("failed to parse {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },
}
