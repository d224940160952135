//! The command model: one undoable/redoable edit operation.
//!
//! A `Command` is a closed tagged union over the five edit kinds (insert
//! text, delete text, character format, paragraph alignment, inline image).
//! Every command captures at construction everything `undo` needs to restore
//! the buffer byte-for-byte: deleted text is read out of the buffer *before*
//! the deletion, formats and alignments are captured per char/paragraph, and
//! the pre-edit cursor/selection is snapshotted.
//!
//! # Invariants
//!
//! - `execute()` followed by `undo()` restores the prior buffer content and
//!   the captured cursor/selection exactly
//! - `can_merge()` is a pure predicate; calling it repeatedly is free
//! - `merge()` is only valid after `can_merge()` returned true for the same
//!   pair in the same order; violating that asserts (undo fidelity would
//!   silently corrupt otherwise)

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

use crate::core::buffer::EditBuffer;
use crate::core::clock::Clock;
use crate::core::error::CommandError;
use crate::core::format::{Alignment, CharFormat, ImageRef};
use crate::core::selection::CursorSnapshot;

static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a command, assigned at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u64);

impl CommandId {
    fn next() -> Self {
        Self(NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({})", self.0)
    }
}

/// Payload of a command, one variant per edit kind.
///
/// A closed enum instead of open subclassing: match sites stay exhaustive,
/// and merging needs no downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// Insert `text` at `position`.
    InsertText {
        /// Char offset where insertion begins
        position: usize,
        /// The exact character sequence inserted (grows on merge)
        text: String,
        /// Whether this insert began life as a single keystroke. Captured at
        /// construction and kept across merges, so a typing run keeps
        /// accepting keystrokes even after its text has grown.
        keystroke: bool,
    },
    /// Remove the span that held `text` at `position`.
    DeleteText {
        /// Char offset of the deleted span
        position: usize,
        /// The exact text removed, captured before deletion
        text: String,
    },
    /// Overlay a character-format delta onto `[start, end)`.
    Format {
        /// Range start (char offset)
        start: usize,
        /// Range end (char offset, exclusive)
        end: usize,
        /// The delta to apply
        format: CharFormat,
        /// Full per-char formats captured before applying, for exact undo
        old_formats: Vec<CharFormat>,
    },
    /// Set paragraph alignment over the paragraphs covering `[start, end]`.
    Alignment {
        /// Range start (char offset)
        start: usize,
        /// Range end (char offset)
        end: usize,
        /// The new alignment
        alignment: Alignment,
        /// Index of the first paragraph touched
        first_para: usize,
        /// Previous alignment of each touched paragraph, for undo
        old_alignments: Vec<Alignment>,
    },
    /// Embed an image at `position` (occupies one char).
    InsertImage {
        /// Char offset of insertion
        position: usize,
        /// Image descriptor
        image: ImageRef,
    },
}

/// One undoable/redoable edit operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: CommandId,
    timestamp: Instant,
    cursor: CursorSnapshot,
    kind: CommandKind,
}

/// A string counts as one keystroke when it is a single grapheme cluster.
fn is_single_grapheme(s: &str) -> bool {
    s.graphemes(true).count() == 1
}

impl Command {
    fn new(kind: CommandKind, buf: &dyn EditBuffer, clock: &dyn Clock) -> Self {
        Self {
            id: CommandId::next(),
            timestamp: clock.now(),
            cursor: CursorSnapshot::capture(buf),
            kind,
        }
    }

    /// Command that inserts `text` at `position`.
    ///
    /// Zero-length text is guarded by the call site, never constructed here.
    pub fn insert_text(
        buf: &dyn EditBuffer,
        position: usize,
        text: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty(), "zero-length insert");
        let keystroke = is_single_grapheme(&text);
        Self::new(
            CommandKind::InsertText {
                position,
                text,
                keystroke,
            },
            buf,
            clock,
        )
    }

    /// Command that deletes `len` chars at `position`.
    ///
    /// The doomed text is captured from the buffer here, before any deletion
    /// happens; that capture is what `undo` re-inserts.
    pub fn delete_text(
        buf: &dyn EditBuffer,
        position: usize,
        len: usize,
        clock: &dyn Clock,
    ) -> Result<Self, CommandError> {
        debug_assert!(len > 0, "zero-length delete");
        if position + len > buf.len_chars() {
            return Err(CommandError::InvalidRange {
                start: position,
                end: position + len,
                len: buf.len_chars(),
            });
        }
        let text = buf.text_range(position, len);
        Ok(Self::new(
            CommandKind::DeleteText { position, text },
            buf,
            clock,
        ))
    }

    /// Command that overlays a format delta onto `[start, end)`.
    pub fn format(
        buf: &dyn EditBuffer,
        start: usize,
        end: usize,
        format: CharFormat,
        clock: &dyn Clock,
    ) -> Result<Self, CommandError> {
        if start > end || end > buf.len_chars() {
            return Err(CommandError::InvalidRange {
                start,
                end,
                len: buf.len_chars(),
            });
        }
        let old_formats = (start..end).map(|pos| buf.char_format(pos)).collect();
        Ok(Self::new(
            CommandKind::Format {
                start,
                end,
                format,
                old_formats,
            },
            buf,
            clock,
        ))
    }

    /// Command that aligns the paragraphs covering `[start, end]`.
    pub fn alignment(
        buf: &dyn EditBuffer,
        start: usize,
        end: usize,
        alignment: Alignment,
        clock: &dyn Clock,
    ) -> Result<Self, CommandError> {
        if start > end || end > buf.len_chars() {
            return Err(CommandError::InvalidRange {
                start,
                end,
                len: buf.len_chars(),
            });
        }
        let first_para = buf.paragraph_of(start);
        let last_para = buf.paragraph_of(end);
        let old_alignments = (first_para..=last_para)
            .map(|para| buf.alignment_of_paragraph(para))
            .collect();
        Ok(Self::new(
            CommandKind::Alignment {
                start,
                end,
                alignment,
                first_para,
                old_alignments,
            },
            buf,
            clock,
        ))
    }

    /// Command that embeds an image at `position`.
    pub fn insert_image(
        buf: &dyn EditBuffer,
        position: usize,
        image: ImageRef,
        clock: &dyn Clock,
    ) -> Self {
        Self::new(CommandKind::InsertImage { position, image }, buf, clock)
    }

    /// Unique id assigned at construction.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Construction instant; used only for merge-window decisions.
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// The payload variant.
    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// Cursor/selection state captured before the edit.
    pub fn cursor_snapshot(&self) -> CursorSnapshot {
        self.cursor
    }

    /// Human-readable label for undo/redo UI affordances.
    pub fn describe(&self) -> &'static str {
        match &self.kind {
            CommandKind::InsertText { .. } => "Insert text",
            CommandKind::DeleteText { .. } => "Delete text",
            CommandKind::Format { .. } => "Apply format",
            CommandKind::Alignment { .. } => "Set alignment",
            CommandKind::InsertImage { .. } => "Insert image",
        }
    }

    /// Apply the edit to the buffer and reposition the caret after it.
    ///
    /// On error the buffer is unchanged.
    pub fn execute(&mut self, buf: &mut dyn EditBuffer) -> Result<(), CommandError> {
        match &self.kind {
            CommandKind::InsertText { position, text, .. } => {
                buf.insert_text(*position, text)?;
                buf.set_cursor(*position + text.chars().count());
            }
            CommandKind::DeleteText { position, text } => {
                let len = text.chars().count();
                let found = buf.text_range(*position, len);
                if found != *text {
                    return Err(CommandError::StateDrift {
                        position: *position,
                        expected: text.clone(),
                        found,
                    });
                }
                buf.remove_range(*position, len)?;
                buf.set_cursor(*position);
            }
            CommandKind::Format {
                start, end, format, ..
            } => {
                buf.merge_char_format(*start, *end, format)?;
                buf.set_selection(*start, *end);
            }
            CommandKind::Alignment {
                start,
                end,
                alignment,
                ..
            } => {
                buf.set_alignment(*start, *end, *alignment)?;
                buf.set_selection(*start, *end);
            }
            CommandKind::InsertImage { position, image } => {
                buf.insert_image(*position, image.clone())?;
                buf.set_cursor(*position + 1);
            }
        }
        Ok(())
    }

    /// Reverse exactly the effect of the most recent `execute`, restoring
    /// buffer content and the captured cursor/selection.
    ///
    /// On error the buffer is unchanged.
    pub fn undo(&mut self, buf: &mut dyn EditBuffer) -> Result<(), CommandError> {
        match &self.kind {
            CommandKind::InsertText { position, text, .. } => {
                let len = text.chars().count();
                let found = buf.text_range(*position, len);
                if found != *text {
                    return Err(CommandError::StateDrift {
                        position: *position,
                        expected: text.clone(),
                        found,
                    });
                }
                buf.remove_range(*position, len)?;
            }
            CommandKind::DeleteText { position, text } => {
                buf.insert_text(*position, text)?;
            }
            CommandKind::Format {
                start, old_formats, ..
            } => {
                // Pre-check so the per-char restore loop cannot fail halfway
                if start + old_formats.len() > buf.len_chars() {
                    return Err(CommandError::InvalidRange {
                        start: *start,
                        end: start + old_formats.len(),
                        len: buf.len_chars(),
                    });
                }
                for (i, old) in old_formats.iter().enumerate() {
                    buf.set_char_format(start + i, old.clone())?;
                }
            }
            CommandKind::Alignment {
                first_para,
                old_alignments,
                ..
            } => {
                if first_para + old_alignments.len() > buf.paragraph_count() {
                    return Err(CommandError::PositionOutOfBounds {
                        position: first_para + old_alignments.len(),
                        len: buf.paragraph_count(),
                    });
                }
                for (i, old) in old_alignments.iter().enumerate() {
                    buf.set_paragraph_alignment(first_para + i, *old)?;
                }
            }
            CommandKind::InsertImage { position, .. } => {
                buf.remove_image_at(*position)?;
            }
        }
        self.cursor.restore(buf);
        Ok(())
    }

    /// Whether `other` (the newer command) can fuse into this one.
    ///
    /// Pure predicate, callable repeatedly. Only insert+insert and
    /// delete+delete pairs ever merge; format, alignment, and image commands
    /// are atomic.
    pub fn can_merge(&self, other: &Command, window: Duration) -> bool {
        let within = other.timestamp.saturating_duration_since(self.timestamp) <= window;
        match (&self.kind, &other.kind) {
            (
                CommandKind::InsertText {
                    position,
                    text,
                    keystroke,
                },
                CommandKind::InsertText {
                    position: other_pos,
                    keystroke: other_keystroke,
                    ..
                },
            ) => {
                // Strictly adjacent, forward; a keystroke never fuses into a
                // paste (and vice versa)
                within
                    && *other_pos == position + text.chars().count()
                    && keystroke == other_keystroke
            }
            (
                CommandKind::DeleteText { position, .. },
                CommandKind::DeleteText {
                    position: other_pos,
                    text: other_text,
                },
            ) => {
                // Delete key repeats at the same offset; Backspace ends where
                // the previous cut began
                within
                    && (*other_pos == *position
                        || other_pos + other_text.chars().count() == *position)
            }
            _ => false,
        }
    }

    /// Fuse `other` into this command so both undo as a single step.
    ///
    /// Contract: only call after `can_merge(&other, window)` returned true
    /// for the same pair in the same order. A violated contract panics.
    /// Merging adopts `other`'s timestamp, so sustained typing keeps
    /// refreshing the window anchor.
    pub fn merge(&mut self, other: Command) {
        let Command {
            timestamp, kind, ..
        } = other;
        match (&mut self.kind, kind) {
            (
                CommandKind::InsertText { position, text, .. },
                CommandKind::InsertText {
                    position: other_pos,
                    text: other_text,
                    ..
                },
            ) => {
                assert!(
                    other_pos == *position + text.chars().count(),
                    "merge without a passing can_merge: non-adjacent inserts"
                );
                text.push_str(&other_text);
            }
            (
                CommandKind::DeleteText { position, text },
                CommandKind::DeleteText {
                    position: other_pos,
                    text: other_text,
                },
            ) => {
                if other_pos == *position {
                    // Forward deletion: append
                    text.push_str(&other_text);
                } else if other_pos + other_text.chars().count() == *position {
                    // Backward deletion: prepend and adopt the earlier offset
                    text.insert_str(0, &other_text);
                    *position = other_pos;
                } else {
                    panic!("merge without a passing can_merge: non-adjacent deletes");
                }
            }
            _ => panic!("merge without a passing can_merge: incompatible command kinds"),
        }
        self.timestamp = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::RichBuffer;
    use crate::core::clock::ManualClock;
    use crate::core::selection::Selection;

    fn insert(buf: &RichBuffer, pos: usize, text: &str, clock: &ManualClock) -> Command {
        Command::insert_text(buf, pos, text, clock)
    }

    #[test]
    fn test_ids_are_unique() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let a = insert(&buf, 0, "a", &clock);
        let b = insert(&buf, 0, "b", &clock);
        assert_ne!(a.id(), b.id());
        assert!(a.id().raw() < b.id().raw());
    }

    #[test]
    fn test_insert_execute_undo_round_trip() {
        let mut buf = RichBuffer::from_str("world");
        buf.set_cursor(0);
        let clock = ManualClock::new();

        let mut cmd = insert(&buf, 0, "hello ", &clock);
        cmd.execute(&mut buf).unwrap();
        assert_eq!(buf.text(), "hello world");
        assert_eq!(buf.cursor(), 6);

        cmd.undo(&mut buf).unwrap();
        assert_eq!(buf.text(), "world");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_captures_text_at_construction() {
        let mut buf = RichBuffer::from_str("cat");
        let clock = ManualClock::new();

        let mut cmd = Command::delete_text(&buf, 1, 1, &clock).unwrap();
        assert!(matches!(
            cmd.kind(),
            CommandKind::DeleteText { position: 1, text } if text == "a"
        ));

        cmd.execute(&mut buf).unwrap();
        assert_eq!(buf.text(), "ct");

        cmd.undo(&mut buf).unwrap();
        assert_eq!(buf.text(), "cat");
    }

    #[test]
    fn test_delete_out_of_range_rejected_at_construction() {
        let buf = RichBuffer::from_str("ab");
        let clock = ManualClock::new();
        assert!(Command::delete_text(&buf, 1, 5, &clock).is_err());
    }

    #[test]
    fn test_execute_detects_drift() {
        let mut buf = RichBuffer::from_str("cat");
        let clock = ManualClock::new();
        let mut cmd = Command::delete_text(&buf, 0, 3, &clock).unwrap();

        // External mutation between construction and execute
        buf.remove_range(0, 1).unwrap();
        let err = cmd.execute(&mut buf).unwrap_err();
        assert!(matches!(err, CommandError::StateDrift { .. }));
        assert_eq!(buf.text(), "at");
    }

    #[test]
    fn test_undo_restores_selection() {
        let mut buf = RichBuffer::from_str("hello world");
        buf.set_selection(0, 5);
        let clock = ManualClock::new();

        let mut cmd = insert(&buf, 11, "!", &clock);
        cmd.execute(&mut buf).unwrap();
        assert!(buf.selection().is_empty());

        cmd.undo(&mut buf).unwrap();
        assert_eq!(buf.selection(), Selection::new(0, 5));
    }

    #[test]
    fn test_typing_merge() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        let mut first = insert(&buf, 0, "H", &clock);
        clock.advance(Duration::from_millis(900));
        let second = insert(&buf, 1, "i", &clock);

        assert!(first.can_merge(&second, window));
        // Pure predicate: asking twice changes nothing
        assert!(first.can_merge(&second, window));

        first.merge(second);
        assert!(matches!(
            first.kind(),
            CommandKind::InsertText { position: 0, text, .. } if text == "Hi"
        ));
    }

    #[test]
    fn test_merge_window_excludes_slow_typing() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        let first = insert(&buf, 0, "H", &clock);
        clock.advance(Duration::from_millis(2001));
        let second = insert(&buf, 1, "i", &clock);
        assert!(!first.can_merge(&second, window));
    }

    #[test]
    fn test_merge_refreshes_window_anchor() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        let mut first = insert(&buf, 0, "a", &clock);
        clock.advance(Duration::from_millis(1500));
        let second = insert(&buf, 1, "b", &clock);
        assert!(first.can_merge(&second, window));
        first.merge(second);

        // 3s after the first keystroke but only 1.5s after the merged one
        clock.advance(Duration::from_millis(1500));
        let third = insert(&buf, 2, "c", &clock);
        assert!(first.can_merge(&third, window));
    }

    #[test]
    fn test_keystroke_never_merges_into_paste() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        let keystroke = insert(&buf, 0, "a", &clock);
        let paste = insert(&buf, 1, "lpha", &clock);
        assert!(!keystroke.can_merge(&paste, window));

        let paste2 = insert(&buf, 0, "beta", &clock);
        let keystroke2 = insert(&buf, 4, "!", &clock);
        assert!(!paste2.can_merge(&keystroke2, window));

        // Two pastes do merge
        let paste3 = insert(&buf, 0, "ab", &clock);
        let paste4 = insert(&buf, 2, "cd", &clock);
        assert!(paste3.can_merge(&paste4, window));
    }

    #[test]
    fn test_non_adjacent_inserts_do_not_merge() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        let first = insert(&buf, 0, "a", &clock);
        let gap = insert(&buf, 5, "b", &clock);
        assert!(!first.can_merge(&gap, window));

        // Backward adjacency is not insert adjacency either
        let back = insert(&buf, 0, "b", &clock);
        let front = insert(&buf, 0, "a", &clock);
        assert!(!back.can_merge(&front, window));
    }

    #[test]
    fn test_delete_key_merge_appends() {
        let mut buf = RichBuffer::from_str("abc");
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        // Delete key twice at offset 0: removes 'a' then 'b'
        let mut first = Command::delete_text(&buf, 0, 1, &clock).unwrap();
        first.execute(&mut buf).unwrap();
        let mut second = Command::delete_text(&buf, 0, 1, &clock).unwrap();
        second.execute(&mut buf).unwrap();

        assert!(first.can_merge(&second, window));
        first.merge(second);
        assert!(matches!(
            first.kind(),
            CommandKind::DeleteText { position: 0, text } if text == "ab"
        ));

        first.undo(&mut buf).unwrap();
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_backspace_merge_prepends() {
        let mut buf = RichBuffer::from_str("abc");
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        // Backspace twice from the end: removes 'c' then 'b'
        let mut first = Command::delete_text(&buf, 2, 1, &clock).unwrap();
        first.execute(&mut buf).unwrap();
        let mut second = Command::delete_text(&buf, 1, 1, &clock).unwrap();
        second.execute(&mut buf).unwrap();

        assert!(first.can_merge(&second, window));
        first.merge(second);
        assert!(matches!(
            first.kind(),
            CommandKind::DeleteText { position: 1, text } if text == "bc"
        ));

        first.undo(&mut buf).unwrap();
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_atomic_kinds_never_merge() {
        let buf = RichBuffer::from_str("abc");
        let clock = ManualClock::new();
        let window = Duration::from_secs(2);

        let fmt_a = Command::format(&buf, 0, 1, CharFormat::none().with_bold(true), &clock)
            .unwrap();
        let fmt_b = Command::format(&buf, 1, 2, CharFormat::none().with_bold(true), &clock)
            .unwrap();
        assert!(!fmt_a.can_merge(&fmt_b, window));

        let ins = insert(&buf, 0, "x", &clock);
        assert!(!ins.can_merge(&fmt_a, window));
        assert!(!fmt_a.can_merge(&ins, window));

        let img_a = Command::insert_image(&buf, 0, ImageRef::new("a.png", 1, 1), &clock);
        let img_b = Command::insert_image(&buf, 1, ImageRef::new("b.png", 1, 1), &clock);
        assert!(!img_a.can_merge(&img_b, window));
    }

    #[test]
    #[should_panic(expected = "without a passing can_merge")]
    fn test_merge_contract_violation_panics() {
        let buf = RichBuffer::new();
        let clock = ManualClock::new();
        let mut ins = insert(&buf, 0, "a", &clock);
        let del = Command::delete_text(&RichBuffer::from_str("x"), 0, 1, &clock).unwrap();
        ins.merge(del);
    }

    #[test]
    fn test_format_round_trip_over_mixed_selection() {
        let mut buf = RichBuffer::from_str("abc");
        buf.merge_char_format(1, 2, &CharFormat::none().with_italic(true))
            .unwrap();
        let clock = ManualClock::new();

        let mut cmd =
            Command::format(&buf, 0, 3, CharFormat::none().with_bold(true), &clock).unwrap();
        cmd.execute(&mut buf).unwrap();
        assert_eq!(buf.char_format(0).bold, Some(true));
        assert_eq!(buf.char_format(1).italic, Some(true));

        cmd.undo(&mut buf).unwrap();
        assert_eq!(buf.char_format(0).bold, None);
        assert_eq!(buf.char_format(1).italic, Some(true));
        assert_eq!(buf.char_format(1).bold, None);
    }

    #[test]
    fn test_alignment_round_trip() {
        let mut buf = RichBuffer::from_str("one\ntwo");
        buf.set_paragraph_alignment(1, Alignment::End).unwrap();
        let clock = ManualClock::new();

        let mut cmd = Command::alignment(&buf, 0, 6, Alignment::Center, &clock).unwrap();
        cmd.execute(&mut buf).unwrap();
        assert_eq!(buf.alignment_of_paragraph(0), Alignment::Center);
        assert_eq!(buf.alignment_of_paragraph(1), Alignment::Center);

        cmd.undo(&mut buf).unwrap();
        assert_eq!(buf.alignment_of_paragraph(0), Alignment::Start);
        assert_eq!(buf.alignment_of_paragraph(1), Alignment::End);
    }

    #[test]
    fn test_image_round_trip() {
        let mut buf = RichBuffer::from_str("ab");
        buf.set_cursor(1);
        let clock = ManualClock::new();

        let mut cmd =
            Command::insert_image(&buf, 1, ImageRef::new("pic.png", 32, 32), &clock);
        cmd.execute(&mut buf).unwrap();
        assert_eq!(buf.text(), "a\u{FFFC}b");
        assert_eq!(buf.cursor(), 2);

        cmd.undo(&mut buf).unwrap();
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_edge_positions_need_no_special_case() {
        let mut buf = RichBuffer::from_str("mid");
        let clock = ManualClock::new();

        // Insert at 0 and at end-of-buffer
        let mut front = insert(&buf, 0, ">", &clock);
        front.execute(&mut buf).unwrap();
        let mut back = insert(&buf, buf.len_chars(), "<", &clock);
        back.execute(&mut buf).unwrap();
        assert_eq!(buf.text(), ">mid<");

        back.undo(&mut buf).unwrap();
        front.undo(&mut buf).unwrap();
        assert_eq!(buf.text(), "mid");
    }

    #[test]
    fn test_describe() {
        let buf = RichBuffer::from_str("a");
        let clock = ManualClock::new();
        assert_eq!(insert(&buf, 0, "x", &clock).describe(), "Insert text");
        assert_eq!(
            Command::delete_text(&buf, 0, 1, &clock).unwrap().describe(),
            "Delete text"
        );
    }
}
