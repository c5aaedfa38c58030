//! In-memory DuplicateCache.

use std::sync::Arc;

use dashmap::DashMap;
use examforge_core::errors::ForgeResult;
use examforge_core::models::SignatureEntry;
use examforge_core::traits::ISignatureStore;

use crate::state::SessionState;

/// Thread-safe per-session signature cache.
#[derive(Clone, Default)]
pub struct InMemorySignatureStore {
    sessions: Arc<DashMap<String, SessionState<SignatureEntry>>>,
}

impl InMemorySignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn len(&self, session_id: &str) -> usize {
        self.sessions.get(session_id).map(|s| s.len()).unwrap_or(0)
    }

    pub fn remove_idle(&self, max_idle: chrono::Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.idle_duration() <= max_idle);
        before - self.sessions.len()
    }
}

impl ISignatureStore for InMemorySignatureStore {
    fn recent(&self, session_id: &str, depth: usize) -> ForgeResult<Vec<SignatureEntry>> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|s| s.recent(depth))
            .unwrap_or_default())
    }

    fn record_if(
        &self,
        session_id: &str,
        depth: usize,
        entry: SignatureEntry,
        accept: &mut dyn FnMut(&[SignatureEntry]) -> bool,
    ) -> ForgeResult<bool> {
        // The entry guard serializes concurrent checks for the same session.
        let mut state = self.sessions.entry(session_id.to_string()).or_default();
        let recent = state.recent(depth);
        if !accept(&recent) {
            return Ok(false);
        }
        state.push_bounded(entry, depth);
        Ok(true)
    }

    fn evict(&self, session_id: &str) -> ForgeResult<()> {
        self.sessions.remove(session_id);
        Ok(())
    }
}
