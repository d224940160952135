// Configuration module
// Tunables for the undo history: capacity bound and merge window

use std::time::Duration;

/// Default maximum number of entries on the undo stack.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Default merge window: commands closer together than this may fuse.
pub const DEFAULT_MERGE_WINDOW: Duration = Duration::from_secs(2);

/// Tunable knobs for a `CommandHistory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Capacity bound on the undo stack; the oldest entry is evicted
    /// (dropped, not moved to redo) when the bound would be exceeded.
    pub max_history: usize,
    /// Maximum gap between two commands' timestamps for which fusion
    /// is still permitted.
    pub merge_window: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            merge_window: DEFAULT_MERGE_WINDOW,
        }
    }
}

impl HistoryConfig {
    /// Builder: set the undo stack capacity. Must be positive.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        assert!(max_history > 0, "max_history must be positive");
        self.max_history = max_history;
        self
    }

    /// Builder: set the merge window.
    pub fn with_merge_window(mut self, merge_window: Duration) -> Self {
        self.merge_window = merge_window;
        self
    }
}
