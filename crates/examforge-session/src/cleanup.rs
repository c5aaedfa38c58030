//! Idle-session cleanup for the in-memory stores.

use tracing::info;

use crate::history::InMemoryHistoryStore;
use crate::signatures::InMemorySignatureStore;

/// Drop sessions idle longer than `max_idle` from both stores.
/// Returns the total number of session records removed.
pub fn cleanup_idle_sessions(
    history: &InMemoryHistoryStore,
    signatures: &InMemorySignatureStore,
    max_idle: chrono::Duration,
) -> usize {
    let removed = history.remove_idle(max_idle) + signatures.remove_idle(max_idle);
    if removed > 0 {
        info!(removed, max_idle_secs = max_idle.num_seconds(), "cleaned up idle sessions");
    }
    removed
}
