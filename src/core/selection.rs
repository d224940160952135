//! Selection Model
//!
//! Represents cursor and selection state in the editable buffer:
//! - Point selections (bare cursor position)
//! - Range selections (anchor to cursor, in either order)
//! - Pre-edit snapshots that commands capture at construction and restore on undo

use std::cmp::{max, min};

use crate::core::buffer::EditBuffer;

// =============================================================================
// SELECTION STRUCT
// =============================================================================

/// A text selection in the buffer
///
/// Selections are represented as a range from anchor to cursor.
/// The anchor is where the selection started, cursor is where it ends.
/// They can be in any order (anchor before or after cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Anchor position (where selection started)
    pub anchor: usize,
    /// Cursor position (where selection ends)
    pub cursor: usize,
}

impl Selection {
    /// Create a new selection at a single point (no selection)
    pub fn point(pos: usize) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
        }
    }

    /// Create a selection from anchor to cursor
    pub fn new(anchor: usize, cursor: usize) -> Self {
        Self { anchor, cursor }
    }

    /// Check if this is a point selection (no range)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }

    /// Get the start of the selection (smaller position)
    pub fn start(&self) -> usize {
        min(self.anchor, self.cursor)
    }

    /// Get the end of the selection (larger position)
    pub fn end(&self) -> usize {
        max(self.anchor, self.cursor)
    }

    /// Length of the selected span in chars
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }
}

// =============================================================================
// CURSOR SNAPSHOT
// =============================================================================

/// Cursor and selection state captured when a command is constructed.
///
/// Every command records where the caret sat before its edit so that `undo`
/// can put the user back exactly where they were. When there is no active
/// selection, the selection collapses to the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// Buffer offset where the edit cursor sat at construction
    pub cursor: usize,
    /// Active selection at construction (point selection when none)
    pub selection: Selection,
}

impl CursorSnapshot {
    /// Capture the current cursor/selection state of a buffer.
    pub fn capture(buf: &dyn EditBuffer) -> Self {
        Self {
            cursor: buf.cursor(),
            selection: buf.selection(),
        }
    }

    /// Restore the captured state onto a buffer.
    pub fn restore(&self, buf: &mut dyn EditBuffer) {
        if self.selection.is_empty() {
            buf.set_cursor(self.cursor);
        } else {
            buf.set_selection(self.selection.anchor, self.selection.cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::RichBuffer;

    #[test]
    fn test_point_selection() {
        let sel = Selection::point(5);
        assert!(sel.is_empty());
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 5);
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_reversed_selection_normalizes() {
        // Anchor after cursor (selected backwards)
        let sel = Selection::new(8, 3);
        assert_eq!(sel.start(), 3);
        assert_eq!(sel.end(), 8);
        assert_eq!(sel.len(), 5);
        assert!(!sel.is_empty());
    }

    #[test]
    fn test_snapshot_capture_and_restore() {
        let mut buf = RichBuffer::from_str("hello world");
        buf.set_selection(6, 11);

        let snap = CursorSnapshot::capture(&buf);
        assert_eq!(snap.selection, Selection::new(6, 11));

        buf.set_cursor(0);
        assert!(buf.selection().is_empty());

        snap.restore(&mut buf);
        assert_eq!(buf.selection(), Selection::new(6, 11));
        assert_eq!(buf.cursor(), 11);
    }

    #[test]
    fn test_snapshot_restore_point() {
        let mut buf = RichBuffer::from_str("hello");
        buf.set_cursor(3);
        let snap = CursorSnapshot::capture(&buf);

        buf.set_selection(0, 5);
        snap.restore(&mut buf);
        assert_eq!(buf.cursor(), 3);
        assert!(buf.selection().is_empty());
    }
}
