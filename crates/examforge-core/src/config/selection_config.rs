use serde::{Deserialize, Serialize};

use super::defaults;

/// Blueprint selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of recent history entries consulted for rotation and bias.
    pub history_depth: usize,
    /// Number of history entries retained per session before eviction.
    /// Never smaller than `history_depth` in effect.
    pub max_history_entries: usize,
}

impl SelectionConfig {
    /// Retained depth, widened to cover the rotation window.
    pub fn retained_depth(&self) -> usize {
        self.max_history_entries.max(self.history_depth)
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            history_depth: defaults::DEFAULT_SELECTION_HISTORY_DEPTH,
            max_history_entries: defaults::DEFAULT_MAX_HISTORY_ENTRIES,
        }
    }
}
