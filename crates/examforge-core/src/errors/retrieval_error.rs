/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("vector index search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("index snapshot unavailable: {reason}")]
    SnapshotUnavailable { reason: String },
}
