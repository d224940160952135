//! Bounded undo/redo history.
//!
//! `CommandHistory` owns two stacks of executed commands:
//! - the undo stack, newest at the back, bounded by `max_history`
//! - the redo stack, populated only by `undo`, cleared by every `push`
//!
//! Pushing a new command first invalidates redo, then either fuses the
//! command into the stack top (when the merge rules allow) or appends it,
//! evicting the oldest entry once the bound would be exceeded. Evicted
//! entries are dropped, never moved to redo.
//!
//! # Invariants
//!
//! - `undo_depth() <= max_history` at all times
//! - a non-empty redo stack implies the last mutation was an `undo`
//! - failed execute/undo/redo leaves both stacks positionally unchanged
//!   (a failed `push` has still cleared redo, per the invalidation rule)

use std::collections::VecDeque;
use std::fmt;

use log::{trace, warn};

use crate::config::HistoryConfig;
use crate::core::buffer::EditBuffer;
use crate::core::command::Command;

// =============================================================================
// EVENTS
// =============================================================================

/// Notification emitted after the history's observable state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    /// The stacks changed (push, merge, undo, redo, clear, or eviction)
    Changed,
    /// Undo availability flipped to the contained value
    UndoAvailable(bool),
    /// Redo availability flipped to the contained value
    RedoAvailable(bool),
}

/// Callback invoked on every [`HistoryEvent`].
pub type HistoryListener = Box<dyn FnMut(HistoryEvent)>;

// =============================================================================
// STATS
// =============================================================================

/// Running counters over the lifetime of a history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Commands accepted by `push` (merged pushes included)
    pub pushed: u64,
    /// Pushes that fused into the stack top instead of appending
    pub merged: u64,
    /// Entries dropped from the front to honor the capacity bound
    pub evicted: u64,
    /// Successful undo operations
    pub undone: u64,
    /// Successful redo operations
    pub redone: u64,
}

// =============================================================================
// COMMAND HISTORY
// =============================================================================

/// Bounded two-stack undo/redo manager.
pub struct CommandHistory {
    undo_stack: VecDeque<Command>,
    redo_stack: VecDeque<Command>,
    config: HistoryConfig,
    listeners: Vec<HistoryListener>,
    stats: HistoryStats,
    last_undo_available: bool,
    last_redo_available: bool,
}

impl CommandHistory {
    /// Create a history with the given configuration.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(config.max_history.min(64)),
            redo_stack: VecDeque::new(),
            config,
            listeners: Vec::new(),
            stats: HistoryStats::default(),
            last_undo_available: false,
            last_redo_available: false,
        }
    }

    /// The configuration this history was built with.
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Register a listener for [`HistoryEvent`]s.
    pub fn subscribe(&mut self, listener: impl FnMut(HistoryEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Execute `command` against `buf` and record it for undo.
    ///
    /// The redo stack is cleared before anything else happens; a command
    /// that later fails to execute has still invalidated redo. Returns
    /// whether the command executed and was recorded.
    pub fn push(&mut self, mut command: Command, buf: &mut dyn EditBuffer) -> bool {
        let redo_was_populated = !self.redo_stack.is_empty();
        self.redo_stack.clear();

        let mergeable = self
            .undo_stack
            .back()
            .is_some_and(|top| top.can_merge(&command, self.config.merge_window));

        if let Err(err) = command.execute(buf) {
            warn!("push rejected, {} failed to execute: {err}", command.id());
            if redo_was_populated {
                self.notify();
            }
            return false;
        }

        if mergeable {
            if let Some(top) = self.undo_stack.back_mut() {
                trace!("merging {} into {}", command.id(), top.id());
                top.merge(command);
                self.stats.merged += 1;
            }
        } else {
            self.undo_stack.push_back(command);
            if self.undo_stack.len() > self.config.max_history {
                if let Some(evicted) = self.undo_stack.pop_front() {
                    trace!("history full, evicting {}", evicted.id());
                    self.stats.evicted += 1;
                }
            }
        }

        self.stats.pushed += 1;
        self.notify();
        true
    }

    /// Undo the most recent command. Returns whether anything was undone.
    ///
    /// A failed undo leaves the command on the undo stack and the buffer
    /// untouched.
    pub fn undo(&mut self, buf: &mut dyn EditBuffer) -> bool {
        let Some(mut command) = self.undo_stack.pop_back() else {
            return false;
        };
        match command.undo(buf) {
            Ok(()) => {
                trace!("undid {}", command.id());
                self.redo_stack.push_back(command);
                self.stats.undone += 1;
                self.notify();
                true
            }
            Err(err) => {
                warn!("undo of {} failed: {err}", command.id());
                self.undo_stack.push_back(command);
                false
            }
        }
    }

    /// Re-apply the most recently undone command. Returns whether anything
    /// was redone.
    pub fn redo(&mut self, buf: &mut dyn EditBuffer) -> bool {
        let Some(mut command) = self.redo_stack.pop_back() else {
            return false;
        };
        match command.execute(buf) {
            Ok(()) => {
                trace!("redid {}", command.id());
                self.undo_stack.push_back(command);
                self.stats.redone += 1;
                self.notify();
                true
            }
            Err(err) => {
                warn!("redo of {} failed: {err}", command.id());
                self.redo_stack.push_back(command);
                false
            }
        }
    }

    /// Drop both stacks (e.g. after loading a new document).
    pub fn clear(&mut self) {
        if self.undo_stack.is_empty() && self.redo_stack.is_empty() {
            return;
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.notify();
    }

    /// Whether `undo` would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether `redo` would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of entries on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The command `undo` would reverse next.
    pub fn peek_undo(&self) -> Option<&Command> {
        self.undo_stack.back()
    }

    /// The command `redo` would re-apply next.
    pub fn peek_redo(&self) -> Option<&Command> {
        self.redo_stack.back()
    }

    /// Label for an "Undo ..." menu entry, when undo is available.
    pub fn describe_undo(&self) -> Option<&'static str> {
        self.peek_undo().map(Command::describe)
    }

    /// Label for a "Redo ..." menu entry, when redo is available.
    pub fn describe_redo(&self) -> Option<&'static str> {
        self.peek_redo().map(Command::describe)
    }

    /// Lifetime counters.
    pub fn stats(&self) -> HistoryStats {
        self.stats
    }

    fn notify(&mut self) {
        let undo = self.can_undo();
        let redo = self.can_redo();
        for listener in &mut self.listeners {
            listener(HistoryEvent::Changed);
        }
        if undo != self.last_undo_available {
            self.last_undo_available = undo;
            for listener in &mut self.listeners {
                listener(HistoryEvent::UndoAvailable(undo));
            }
        }
        if redo != self.last_redo_available {
            self.last_redo_available = redo;
            for listener in &mut self.listeners {
                listener(HistoryEvent::RedoAvailable(redo));
            }
        }
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .field("stats", &self.stats)
            .finish()
    }
}
