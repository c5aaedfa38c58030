use crate::errors::ForgeResult;
use crate::models::{Blueprint, HistoryEntry, SignatureEntry};

/// Per-session selection history.
///
/// Entries are returned oldest first. Implementations keep at most
/// `max_entries` per session and evict the oldest beyond that.
pub trait IHistoryStore: Send + Sync {
    /// The last `depth` entries for the session, oldest first.
    fn recent(&self, session_id: &str, depth: usize) -> ForgeResult<Vec<HistoryEntry>>;

    fn append(&self, entry: HistoryEntry, max_entries: usize) -> ForgeResult<()>;

    /// Read the last `window` entries, let `select` choose a blueprint, and
    /// append it, all without interleaving another writer for the same session.
    fn select_and_append(
        &self,
        session_id: &str,
        window: usize,
        max_entries: usize,
        select: &mut dyn FnMut(&[HistoryEntry]) -> ForgeResult<Blueprint>,
    ) -> ForgeResult<HistoryEntry>;

    /// Drop all history for a session.
    fn evict(&self, session_id: &str) -> ForgeResult<()>;

    /// Number of entries held for a session.
    fn len(&self, session_id: &str) -> ForgeResult<usize>;
}

/// Per-session cache of accepted question signatures.
pub trait ISignatureStore: Send + Sync {
    /// The last `depth` signatures for the session, oldest first.
    fn recent(&self, session_id: &str, depth: usize) -> ForgeResult<Vec<SignatureEntry>>;

    /// Show `accept` the last `depth` signatures; if it returns true, append
    /// `entry` and evict beyond `depth`. Atomic per session. Returns the decision.
    fn record_if(
        &self,
        session_id: &str,
        depth: usize,
        entry: SignatureEntry,
        accept: &mut dyn FnMut(&[SignatureEntry]) -> bool,
    ) -> ForgeResult<bool>;

    fn evict(&self, session_id: &str) -> ForgeResult<()>;
}
