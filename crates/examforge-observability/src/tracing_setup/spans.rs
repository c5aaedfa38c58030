//! Span definitions per pipeline operation: selection, retrieval, dedup, generation.

/// Create a blueprint selection span.
#[macro_export]
macro_rules! selection_span {
    ($session_id:expr, $profile_id:expr) => {
        tracing::info_span!(
            "examforge.selection",
            session_id = %$session_id,
            profile_id = %$profile_id
        )
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($mode:expr, $domain:expr) => {
        tracing::info_span!("examforge.retrieval", mode = %$mode, domain = %$domain)
    };
}

/// Create a duplicate-check span.
#[macro_export]
macro_rules! dedup_span {
    ($session_id:expr, $attempt:expr) => {
        tracing::info_span!("examforge.dedup", session_id = %$session_id, attempt = $attempt)
    };
}

/// Create a generation request span.
#[macro_export]
macro_rules! generation_span {
    ($session_id:expr, $max_attempts:expr) => {
        tracing::info_span!(
            "examforge.generation",
            session_id = %$session_id,
            max_attempts = $max_attempts
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SELECTION: &str = "examforge.selection";
    pub const RETRIEVAL: &str = "examforge.retrieval";
    pub const DEDUP: &str = "examforge.dedup";
    pub const GENERATION: &str = "examforge.generation";
}
