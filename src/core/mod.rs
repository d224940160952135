//! This module constitutes the core, headless, and backend-agnostic undo engine of quill.
//! It manages the command model (insert, delete, format, alignment, image),
//! cursor snapshot capture, command merging, and the bounded undo/redo history
//! that sequences and reverses edits against an abstract editable buffer.

pub mod buffer;
pub mod clock;
pub mod command;
pub mod error;
pub mod format;
pub mod history;
pub mod selection;
