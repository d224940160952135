//! Error taxonomy for command execution and undo.
//!
//! Execution failures are values, never panics: the history recovers locally
//! by leaving its stacks untouched. The only loud path is a violated merge
//! contract (see `Command::merge`), which is a programmer error.

use thiserror::Error;

/// Errors that can occur while a command executes or undoes against a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Position lies outside the buffer (stale offset after external mutation).
    #[error("position {position} out of bounds (buffer length {len})")]
    PositionOutOfBounds { position: usize, len: usize },

    /// Range start/end are inverted or extend past the buffer.
    #[error("invalid range {start}..{end} (buffer length {len})")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Buffer content no longer matches what the command captured.
    #[error("state drift at {position}: expected {expected:?}, found {found:?}")]
    StateDrift {
        position: usize,
        expected: String,
        found: String,
    },

    /// No embedded image at the given position.
    #[error("no image at position {0}")]
    NoImageAt(usize),
}
