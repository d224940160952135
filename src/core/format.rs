//! Character formats, paragraph alignment, and embedded image descriptors.
//!
//! `CharFormat` is a *delta*: every field is optional, and applying a delta
//! only overrides the fields it names. This is what lets a toolbar toggle
//! "bold" over a mixed-format selection without flattening everything else.

/// A character-format delta (any subset of attributes).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharFormat {
    /// Foreground color in hex notation (e.g. "#1e90ff")
    pub color: Option<String>,
    /// Bold weight
    pub bold: Option<bool>,
    /// Italics
    pub italic: Option<bool>,
    /// Underline
    pub underline: Option<bool>,
    /// Font family name
    pub font_family: Option<String>,
    /// Font size in points
    pub font_size: Option<f32>,
}

impl CharFormat {
    /// A delta that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Check whether this delta specifies no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.font_family.is_none()
            && self.font_size.is_none()
    }

    /// Overlay `delta` onto this format, keeping fields the delta leaves unset.
    pub fn apply(&mut self, delta: &CharFormat) {
        if let Some(c) = &delta.color {
            self.color = Some(c.clone());
        }
        if let Some(b) = delta.bold {
            self.bold = Some(b);
        }
        if let Some(i) = delta.italic {
            self.italic = Some(i);
        }
        if let Some(u) = delta.underline {
            self.underline = Some(u);
        }
        if let Some(f) = &delta.font_family {
            self.font_family = Some(f.clone());
        }
        if let Some(s) = delta.font_size {
            self.font_size = Some(s);
        }
    }

    /// Builder: set bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Builder: set italics.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Builder: set underline.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    /// Builder: set foreground color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builder: set font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Builder: set font size in points.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Aligned to the writing-direction start (left in LTR text)
    #[default]
    Start,
    /// Centered
    Center,
    /// Aligned to the writing-direction end
    End,
    /// Justified
    Justify,
}

/// Descriptor for an embedded image.
///
/// An image occupies exactly one buffer position and is treated as a single
/// atomic character by every offset calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Image source (path or URL)
    pub source: String,
    /// Intrinsic width in pixels
    pub width: u32,
    /// Intrinsic height in pixels
    pub height: u32,
}

impl ImageRef {
    /// Create a new image descriptor.
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_delta() {
        assert!(CharFormat::none().is_empty());
        assert!(!CharFormat::none().with_bold(true).is_empty());
    }

    #[test]
    fn test_apply_overrides_only_named_fields() {
        let mut fmt = CharFormat::none()
            .with_bold(true)
            .with_color("#000000")
            .with_font_size(11.0);

        fmt.apply(&CharFormat::none().with_italic(true).with_color("#ff0000"));

        assert_eq!(fmt.bold, Some(true));
        assert_eq!(fmt.italic, Some(true));
        assert_eq!(fmt.color.as_deref(), Some("#ff0000"));
        assert_eq!(fmt.font_size, Some(11.0));
        assert_eq!(fmt.underline, None);
    }

    #[test]
    fn test_apply_empty_delta_is_noop() {
        let mut fmt = CharFormat::none().with_bold(true);
        let before = fmt.clone();
        fmt.apply(&CharFormat::none());
        assert_eq!(fmt, before);
    }

    #[test]
    fn test_default_alignment() {
        assert_eq!(Alignment::default(), Alignment::Start);
    }

    #[test]
    fn test_image_ref() {
        let img = ImageRef::new("cat.png", 640, 480);
        assert_eq!(img.source, "cat.png");
        assert_eq!(img.width, 640);
        assert_eq!(img.height, 480);
    }
}
