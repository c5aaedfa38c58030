//! Structured log events for the generation pipeline.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A blueprint was chosen and recorded in session history.
pub fn blueprint_selected(
    session_id: &str,
    domain_id: &str,
    difficulty_level_id: &str,
    question_type_id: &str,
    reasoning_mode_id: &str,
) {
    tracing::info!(
        event = "blueprint_selected",
        session_id = %session_id,
        domain_id = %domain_id,
        difficulty_level_id = %difficulty_level_id,
        question_type_id = %question_type_id,
        reasoning_mode_id = %reasoning_mode_id,
        "blueprint selected"
    );
}

pub fn retrieval_completed(mode: &str, retrieval_path: &str, chunks: usize, hot_topics_used: bool) {
    tracing::info!(
        event = "retrieval_completed",
        mode = %mode,
        retrieval_path = %retrieval_path,
        chunks = chunks,
        hot_topics_used = hot_topics_used,
        "retrieval completed"
    );
}

/// A retrieval stage came back empty or failed.
pub fn retrieval_degraded(stage: &str, requested: usize, returned: usize, reason: &str) {
    tracing::warn!(
        event = "retrieval_degraded",
        stage = %stage,
        requested = requested,
        returned = returned,
        reason = %reason,
        "retrieval degraded"
    );
}

/// A candidate was discarded. `similarity` is set for repeat rejections.
pub fn candidate_rejected(session_id: &str, attempt: u32, reason: &str, similarity: Option<f64>) {
    tracing::info!(
        event = "candidate_rejected",
        session_id = %session_id,
        attempt = attempt,
        reason = %reason,
        similarity = ?similarity,
        "candidate rejected"
    );
}

pub fn candidate_accepted(session_id: &str, attempt: u32, max_similarity: f64) {
    tracing::info!(
        event = "candidate_accepted",
        session_id = %session_id,
        attempt = attempt,
        max_similarity = max_similarity,
        "candidate accepted"
    );
}

/// Every attempt was used without an accepted candidate.
pub fn generation_exhausted(session_id: &str, attempts: u32, last_reason: &str) {
    tracing::warn!(
        event = "generation_exhausted",
        session_id = %session_id,
        attempts = attempts,
        last_reason = %last_reason,
        "generation attempts exhausted"
    );
}
