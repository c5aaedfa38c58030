//! In-memory History Tracker.

use std::sync::Arc;

use dashmap::DashMap;
use examforge_core::errors::ForgeResult;
use examforge_core::models::{Blueprint, HistoryEntry};
use examforge_core::traits::IHistoryStore;

use crate::state::SessionState;

/// Thread-safe selection history keyed by session id.
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    sessions: Arc<DashMap<String, SessionState<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns how many were removed.
    pub fn remove_idle(&self, max_idle: chrono::Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.idle_duration() <= max_idle);
        before - self.sessions.len()
    }
}

impl IHistoryStore for InMemoryHistoryStore {
    fn recent(&self, session_id: &str, depth: usize) -> ForgeResult<Vec<HistoryEntry>> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|s| s.recent(depth))
            .unwrap_or_default())
    }

    fn append(&self, entry: HistoryEntry, max_entries: usize) -> ForgeResult<()> {
        self.sessions
            .entry(entry.session_id.clone())
            .or_default()
            .push_bounded(entry, max_entries);
        Ok(())
    }

    fn select_and_append(
        &self,
        session_id: &str,
        window: usize,
        max_entries: usize,
        select: &mut dyn FnMut(&[HistoryEntry]) -> ForgeResult<Blueprint>,
    ) -> ForgeResult<HistoryEntry> {
        // The entry guard holds the shard lock for the whole read-select-append.
        let mut state = self.sessions.entry(session_id.to_string()).or_default();
        let recent = state.recent(window);
        let blueprint = select(&recent)?;
        let entry = HistoryEntry::new(session_id, blueprint);
        state.push_bounded(entry.clone(), max_entries);
        Ok(entry)
    }

    fn evict(&self, session_id: &str) -> ForgeResult<()> {
        self.sessions.remove(session_id);
        Ok(())
    }

    fn len(&self, session_id: &str) -> ForgeResult<usize> {
        Ok(self.sessions.get(session_id).map(|s| s.len()).unwrap_or(0))
    }
}
