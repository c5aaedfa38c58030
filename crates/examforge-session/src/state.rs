//! Bounded per-session log.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Ordered entries for one session, oldest first, with activity timestamps.
#[derive(Debug, Clone)]
pub struct SessionState<T> {
    entries: VecDeque<T>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl<T: Clone> SessionState<T> {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            entries: VecDeque::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Append, evicting from the front until at most `max` entries remain.
    /// Returns the number of evicted entries.
    pub fn push_bounded(&mut self, entry: T, max: usize) -> usize {
        self.entries.push_back(entry);
        let mut evicted = 0;
        while self.entries.len() > max.max(1) {
            self.entries.pop_front();
            evicted += 1;
        }
        self.touch();
        evicted
    }

    /// The last `depth` entries, oldest first.
    pub fn recent(&self, depth: usize) -> Vec<T> {
        let skip = self.entries.len().saturating_sub(depth);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn idle_duration(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}

impl<T: Clone> Default for SessionState<T> {
    fn default() -> Self {
        Self::new()
    }
}
