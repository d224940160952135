//! Editable buffer: the seam between the undo engine and the host editor.
//!
//! Commands never touch a concrete text widget. They speak to the narrow
//! `EditBuffer` trait, which any host (terminal view, GUI widget, headless
//! test) can implement. `RichBuffer` is the crate's in-memory reference
//! implementation, used both as a standalone document model and as the
//! test double for the engine.
//!
//! All offsets are **char indices**. An embedded image occupies exactly one
//! position (stored as U+FFFC, the object replacement character), so offset
//! arithmetic never special-cases images.

use ropey::Rope;

use crate::core::error::CommandError;
use crate::core::format::{Alignment, CharFormat, ImageRef};
use crate::core::selection::Selection;

/// The editable-buffer capability the undo engine consumes.
///
/// Mutating methods return `Err` without changing the buffer when the
/// requested positions are stale; the engine relies on that to keep its
/// stacks consistent after a failed execute or undo.
pub trait EditBuffer {
    /// Total length in chars.
    fn len_chars(&self) -> usize;

    /// Entire content as a string (images appear as U+FFFC).
    fn text(&self) -> String;

    /// Read `len` chars starting at `pos` without mutating.
    fn text_range(&self, pos: usize, len: usize) -> String;

    /// Insert `text` at char position `pos`.
    fn insert_text(&mut self, pos: usize, text: &str) -> Result<(), CommandError>;

    /// Remove `len` chars starting at `pos`, returning the removed text.
    fn remove_range(&mut self, pos: usize, len: usize) -> Result<String, CommandError>;

    /// Full character format at a position.
    fn char_format(&self, pos: usize) -> CharFormat;

    /// Overlay a format delta onto every char in `[start, end)`.
    fn merge_char_format(
        &mut self,
        start: usize,
        end: usize,
        delta: &CharFormat,
    ) -> Result<(), CommandError>;

    /// Replace the full format of a single char (exact-restore path for undo).
    fn set_char_format(&mut self, pos: usize, format: CharFormat) -> Result<(), CommandError>;

    /// Paragraph index containing a char position.
    fn paragraph_of(&self, pos: usize) -> usize;

    /// Number of paragraphs (an empty buffer has one).
    fn paragraph_count(&self) -> usize;

    /// Alignment of a paragraph by index.
    fn alignment_of_paragraph(&self, para: usize) -> Alignment;

    /// Alignment at a char position.
    fn alignment_at(&self, pos: usize) -> Alignment {
        self.alignment_of_paragraph(self.paragraph_of(pos))
    }

    /// Set alignment on every paragraph intersecting `[start, end]`.
    fn set_alignment(
        &mut self,
        start: usize,
        end: usize,
        alignment: Alignment,
    ) -> Result<(), CommandError>;

    /// Set alignment of a single paragraph (exact-restore path for undo).
    fn set_paragraph_alignment(
        &mut self,
        para: usize,
        alignment: Alignment,
    ) -> Result<(), CommandError>;

    /// Embed an image at a position (occupies one char).
    fn insert_image(&mut self, pos: usize, image: ImageRef) -> Result<(), CommandError>;

    /// Remove the image at a position, returning its descriptor.
    fn remove_image_at(&mut self, pos: usize) -> Result<ImageRef, CommandError>;

    /// Image descriptor at a position, if any.
    fn image_at(&self, pos: usize) -> Option<&ImageRef>;

    /// Place the cursor, collapsing any selection.
    fn set_cursor(&mut self, pos: usize);

    /// Set the selection (anchor, cursor — either order); cursor follows `cursor`.
    fn set_selection(&mut self, anchor: usize, cursor: usize);

    /// Current cursor position.
    fn cursor(&self) -> usize;

    /// Current selection (a point selection when nothing is selected).
    fn selection(&self) -> Selection;
}

/// Per-char metadata carried alongside the rope.
#[derive(Debug, Clone, Default)]
struct CharMark {
    format: CharFormat,
    image: Option<ImageRef>,
}

/// In-memory rich-text buffer backed by a ropey Rope.
///
/// Text lives in the rope; a parallel mark vector carries each char's format
/// and optional image; one alignment per paragraph (rope line) is kept in
/// sync across edits. When an edit splits a paragraph, both halves keep the
/// original paragraph's alignment.
#[derive(Debug)]
pub struct RichBuffer {
    rope: Rope,
    marks: Vec<CharMark>,
    alignments: Vec<Alignment>,
    cursor: usize,
    selection: Selection,
    /// Version counter for tracking buffer changes
    version: u64,
}

impl RichBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            marks: Vec::new(),
            alignments: vec![Alignment::default()],
            cursor: 0,
            selection: Selection::point(0),
            version: 0,
        }
    }

    /// Create a buffer from initial plain text (default format throughout).
    pub fn from_str(content: &str) -> Self {
        let rope = Rope::from_str(content);
        let marks = vec![CharMark::default(); rope.len_chars()];
        let alignments = vec![Alignment::default(); rope.len_lines()];
        Self {
            rope,
            marks,
            alignments,
            cursor: 0,
            selection: Selection::point(0),
            version: 0,
        }
    }

    /// How many times this buffer has been mutated.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn check_pos(&self, pos: usize) -> Result<(), CommandError> {
        if pos > self.rope.len_chars() {
            return Err(CommandError::PositionOutOfBounds {
                position: pos,
                len: self.rope.len_chars(),
            });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), CommandError> {
        if start > end || end > self.rope.len_chars() {
            return Err(CommandError::InvalidRange {
                start,
                end,
                len: self.rope.len_chars(),
            });
        }
        Ok(())
    }

    /// Keep the per-paragraph alignment vector in sync after an edit at
    /// `para` that changed the line count from `old_lines` to the current one.
    fn sync_alignments(&mut self, para: usize, old_lines: usize) {
        let new_lines = self.rope.len_lines();
        if new_lines > old_lines {
            let added = new_lines - old_lines;
            let inherited = self.alignments[para];
            for _ in 0..added {
                self.alignments.insert(para + 1, inherited);
            }
        } else if new_lines < old_lines {
            let removed = old_lines - new_lines;
            self.alignments.drain(para + 1..para + 1 + removed);
        }
    }

    fn clamp_caret(&mut self) {
        let len = self.rope.len_chars();
        self.cursor = self.cursor.min(len);
        self.selection = Selection::new(
            self.selection.anchor.min(len),
            self.selection.cursor.min(len),
        );
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

impl Default for RichBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer for RichBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn text_range(&self, pos: usize, len: usize) -> String {
        let total = self.rope.len_chars();
        let start = pos.min(total);
        let end = (pos + len).min(total);
        self.rope.slice(start..end).to_string()
    }

    fn insert_text(&mut self, pos: usize, text: &str) -> Result<(), CommandError> {
        self.check_pos(pos)?;
        if text.is_empty() {
            return Ok(());
        }

        let para = self.rope.char_to_line(pos.min(self.rope.len_chars()));
        let old_lines = self.rope.len_lines();

        // Inserted chars inherit the format of the char just before the
        // insertion point, matching how typing continues the current style.
        let inherited = if pos > 0 {
            self.marks[pos - 1].format.clone()
        } else {
            CharFormat::default()
        };

        self.rope.insert(pos, text);
        let count = text.chars().count();
        self.marks.splice(
            pos..pos,
            std::iter::repeat_with(|| CharMark {
                format: inherited.clone(),
                image: None,
            })
            .take(count),
        );
        self.sync_alignments(para, old_lines);
        self.bump();
        Ok(())
    }

    fn remove_range(&mut self, pos: usize, len: usize) -> Result<String, CommandError> {
        self.check_range(pos, pos + len)?;
        if len == 0 {
            return Ok(String::new());
        }

        let para = self.rope.char_to_line(pos);
        let old_lines = self.rope.len_lines();

        let removed = self.rope.slice(pos..pos + len).to_string();
        self.rope.remove(pos..pos + len);
        self.marks.drain(pos..pos + len);
        self.sync_alignments(para, old_lines);
        self.clamp_caret();
        self.bump();
        Ok(removed)
    }

    fn char_format(&self, pos: usize) -> CharFormat {
        self.marks
            .get(pos)
            .map(|m| m.format.clone())
            .unwrap_or_default()
    }

    fn merge_char_format(
        &mut self,
        start: usize,
        end: usize,
        delta: &CharFormat,
    ) -> Result<(), CommandError> {
        self.check_range(start, end)?;
        for mark in &mut self.marks[start..end] {
            mark.format.apply(delta);
        }
        self.bump();
        Ok(())
    }

    fn set_char_format(&mut self, pos: usize, format: CharFormat) -> Result<(), CommandError> {
        if pos >= self.marks.len() {
            return Err(CommandError::PositionOutOfBounds {
                position: pos,
                len: self.marks.len(),
            });
        }
        self.marks[pos].format = format;
        self.bump();
        Ok(())
    }

    fn paragraph_of(&self, pos: usize) -> usize {
        self.rope.char_to_line(pos.min(self.rope.len_chars()))
    }

    fn paragraph_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn alignment_of_paragraph(&self, para: usize) -> Alignment {
        self.alignments.get(para).copied().unwrap_or_default()
    }

    fn set_alignment(
        &mut self,
        start: usize,
        end: usize,
        alignment: Alignment,
    ) -> Result<(), CommandError> {
        self.check_range(start, end)?;
        let first = self.paragraph_of(start);
        let last = self.paragraph_of(end);
        for para in first..=last {
            self.alignments[para] = alignment;
        }
        self.bump();
        Ok(())
    }

    fn set_paragraph_alignment(
        &mut self,
        para: usize,
        alignment: Alignment,
    ) -> Result<(), CommandError> {
        if para >= self.alignments.len() {
            return Err(CommandError::PositionOutOfBounds {
                position: para,
                len: self.alignments.len(),
            });
        }
        self.alignments[para] = alignment;
        self.bump();
        Ok(())
    }

    fn insert_image(&mut self, pos: usize, image: ImageRef) -> Result<(), CommandError> {
        self.check_pos(pos)?;
        self.rope.insert_char(pos, '\u{FFFC}');
        self.marks.insert(
            pos,
            CharMark {
                format: CharFormat::default(),
                image: Some(image),
            },
        );
        self.bump();
        Ok(())
    }

    fn remove_image_at(&mut self, pos: usize) -> Result<ImageRef, CommandError> {
        let Some(image) = self.marks.get_mut(pos).and_then(|m| m.image.take()) else {
            return Err(CommandError::NoImageAt(pos));
        };
        self.rope.remove(pos..pos + 1);
        self.marks.remove(pos);
        self.clamp_caret();
        self.bump();
        Ok(image)
    }

    fn image_at(&self, pos: usize) -> Option<&ImageRef> {
        self.marks.get(pos).and_then(|m| m.image.as_ref())
    }

    fn set_cursor(&mut self, pos: usize) {
        let pos = pos.min(self.rope.len_chars());
        self.cursor = pos;
        self.selection = Selection::point(pos);
    }

    fn set_selection(&mut self, anchor: usize, cursor: usize) {
        let len = self.rope.len_chars();
        let anchor = anchor.min(len);
        let cursor = cursor.min(len);
        self.selection = Selection::new(anchor, cursor);
        self.cursor = cursor;
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn selection(&self) -> Selection {
        self.selection
    }
}
