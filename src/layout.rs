//! Field layout model: where and how a value sits in a fixed-width line.
//!
//! A [`FieldLayout`] describes one field occurrence: 1-based offset, length
//! in characters, alignment, padding character, formatter kind, and an
//! optional value pattern. A [`LayoutSet`] is the declaration-ordered set of
//! layouts for one record type.
//!
//! Offsets may overlap between fields of the same record. This is a
//! supported feature (aliasing multiple interpretations of the same line
//! region), not an error; no invariant enforces non-overlap.

use crate::error::CodecError;
use crate::formatter::FormatterKind;

/// Default padding character when a field does not specify one.
pub const DEFAULT_PADDING: char = ' ';

/// Horizontal alignment of field content within its slot.
///
/// LEFT content is flush to the start with padding trailing; RIGHT content
/// is flush to the end with padding leading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl Alignment {
    /// Parse a case-insensitive alignment token (`left` / `right`).
    pub fn parse(token: &str) -> Result<Self, CodecError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            other => Err(CodecError::Configuration(format!(
                "unknown alignment '{other}' (expected left or right)"
            ))),
        }
    }
}

/// Immutable formatting bundle handed to a
/// [`ValueFormatter`](crate::formatter::ValueFormatter) for one field
/// occurrence. Built fresh from a [`FieldLayout`] per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatInstructions {
    pub length: usize,
    pub alignment: Alignment,
    pub padding: char,
    pub pattern: Option<String>,
}

/// Static descriptor of one record field.
///
/// Plain mutable data: [`LayoutOverlay`](crate::overlay::LayoutOverlay) is
/// the sanctioned way to change a layout at runtime and restore it
/// afterwards.
#[derive(Debug, Clone)]
pub struct FieldLayout {
    /// Field name, unique within a record type.
    pub name: String,
    /// 1-based start position within the line.
    pub offset: usize,
    /// Number of characters occupied. Zero disables the field: it decodes
    /// to nothing without reading the line and contributes nothing on
    /// encode.
    pub length: usize,
    pub alignment: Alignment,
    pub padding: char,
    pub kind: FormatterKind,
    pub pattern: Option<String>,
}

impl FieldLayout {
    pub fn new(
        name: impl Into<String>,
        offset: usize,
        length: usize,
        kind: FormatterKind,
    ) -> Self {
        FieldLayout {
            name: name.into(),
            offset,
            length,
            alignment: Alignment::default(),
            padding: DEFAULT_PADDING,
            kind,
            pattern: None,
        }
    }

    /// Set the alignment fluently.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the padding character fluently.
    pub fn pad(mut self, padding: char) -> Self {
        self.padding = padding;
        self
    }

    /// Set the value pattern fluently.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Formatting bundle for the current layout values.
    pub fn instructions(&self) -> FormatInstructions {
        FormatInstructions {
            length: self.length,
            alignment: self.alignment,
            padding: self.padding,
            pattern: self.pattern.clone(),
        }
    }

    /// End position: `offset - 1 + length` (0-based, exclusive).
    pub fn end(&self) -> usize {
        self.offset.saturating_sub(1) + self.length
    }

    /// Extract this field's exact-length substring from `line`.
    ///
    /// Positions are counted in characters, not bytes. Fails when the line
    /// is shorter than `offset - 1 + length`.
    pub fn extract(&self, line: &str) -> Result<String, CodecError> {
        let start = self.offset.checked_sub(1).ok_or_else(|| CodecError::Layout {
            field: self.name.clone(),
            message: "offset must be at least 1".to_string(),
        })?;
        let raw: String = line.chars().skip(start).take(self.length).collect();
        if raw.chars().count() < self.length {
            return Err(CodecError::Layout {
                field: self.name.clone(),
                message: format!(
                    "line too short: need {} chars, line has {}",
                    start + self.length,
                    line.chars().count()
                ),
            });
        }
        Ok(raw)
    }

    /// Strip padding from an extracted substring.
    ///
    /// LEFT alignment trims trailing padding, RIGHT trims leading. When a
    /// digit padding character (typically `'0'`) would consume the entire
    /// non-empty substring, one padding char is kept so that an all-zero
    /// numeric field decodes to zero rather than to nothing.
    pub fn strip(&self, raw: &str) -> String {
        let stripped = match self.alignment {
            Alignment::Left => raw.trim_end_matches(self.padding),
            Alignment::Right => raw.trim_start_matches(self.padding),
        };
        if stripped.is_empty() && !raw.is_empty() && self.padding.is_ascii_digit() {
            self.padding.to_string()
        } else {
            stripped.to_string()
        }
    }

    /// Pad or truncate `content` to exactly `length` characters.
    ///
    /// Over-long content is truncated, keeping the first `length` chars for
    /// LEFT alignment and the last `length` for RIGHT, a deliberate lossy
    /// policy, not an error. Short content is padded on the side opposite
    /// the alignment.
    pub fn place(&self, content: &str) -> String {
        let chars: Vec<char> = content.chars().collect();
        if chars.len() > self.length {
            match self.alignment {
                Alignment::Left => chars[..self.length].iter().collect(),
                Alignment::Right => chars[chars.len() - self.length..].iter().collect(),
            }
        } else {
            let fill: String = std::iter::repeat_n(self.padding, self.length - chars.len()).collect();
            match self.alignment {
                Alignment::Left => format!("{content}{fill}"),
                Alignment::Right => format!("{fill}{content}"),
            }
        }
    }
}

/// Declaration-ordered field layouts for one record type.
///
/// Built once per type and treated as read-only by the codec; overlays
/// borrow mutable access for their scoped lifetime.
#[derive(Debug, Clone, Default)]
pub struct LayoutSet {
    fields: Vec<FieldLayout>,
}

impl LayoutSet {
    pub fn new(fields: Vec<FieldLayout>) -> Self {
        LayoutSet { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldLayout> {
        self.fields.iter()
    }

    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldLayout> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total line width: the maximum `offset - 1 + length` across fields.
    pub fn line_width(&self) -> usize {
        self.fields.iter().map(FieldLayout::end).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(offset: usize, length: usize) -> FieldLayout {
        FieldLayout::new("f", offset, length, FormatterKind::Text)
    }

    #[test]
    fn test_extract_exact() {
        let layout = text_field(3, 4);
        assert_eq!(layout.extract("ABCDEFGH").unwrap(), "CDEF");
    }

    #[test]
    fn test_extract_line_too_short() {
        let layout = text_field(3, 10);
        let err = layout.extract("ABCDEF").unwrap_err();
        assert!(matches!(err, CodecError::Layout { .. }), "got {err:?}");
    }

    #[test]
    fn test_extract_zero_offset_rejected() {
        let layout = text_field(0, 4);
        let err = layout.extract("ABCDEFGH").unwrap_err();
        assert!(err.to_string().contains("offset must be at least 1"));
    }

    #[test]
    fn test_strip_left_trims_trailing() {
        let layout = text_field(1, 8);
        assert_eq!(layout.strip("AB      "), "AB");
    }

    #[test]
    fn test_strip_right_trims_leading() {
        let layout = text_field(1, 5).align(Alignment::Right).pad('0');
        assert_eq!(layout.strip("00227"), "227");
    }

    #[test]
    fn test_strip_all_zero_keeps_one() {
        // A zero-padded numeric field holding zero must not strip to nothing.
        let layout = text_field(1, 5).align(Alignment::Right).pad('0');
        assert_eq!(layout.strip("00000"), "0");
    }

    #[test]
    fn test_strip_all_spaces_yields_empty() {
        let layout = text_field(1, 5);
        assert_eq!(layout.strip("     "), "");
    }

    #[test]
    fn test_place_pads_left_aligned_on_right() {
        let layout = text_field(1, 6);
        assert_eq!(layout.place("AB"), "AB    ");
    }

    #[test]
    fn test_place_pads_right_aligned_on_left() {
        let layout = text_field(1, 5).align(Alignment::Right).pad('0');
        assert_eq!(layout.place("227"), "00227");
    }

    #[test]
    fn test_place_truncates_left_keeps_first() {
        let layout = text_field(1, 3);
        assert_eq!(layout.place("ABCDEF"), "ABC");
    }

    #[test]
    fn test_place_truncates_right_keeps_last() {
        let layout = text_field(1, 3).align(Alignment::Right);
        assert_eq!(layout.place("ABCDEF"), "DEF");
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!(Alignment::parse("LEFT").unwrap(), Alignment::Left);
        assert_eq!(Alignment::parse("right").unwrap(), Alignment::Right);
        assert!(matches!(
            Alignment::parse("top").unwrap_err(),
            CodecError::Configuration(_)
        ));
    }

    #[test]
    fn test_line_width_is_max_extent() {
        let set = LayoutSet::new(vec![text_field(1, 20), text_field(21, 5), text_field(26, 10)]);
        assert_eq!(set.line_width(), 35);
    }

    #[test]
    fn test_line_width_with_overlap() {
        // Overlapping fields are allowed; width is still the max extent.
        let set = LayoutSet::new(vec![text_field(1, 20), text_field(1, 5)]);
        assert_eq!(set.line_width(), 20);
    }

    #[test]
    fn test_field_lookup() {
        let mut set = LayoutSet::new(vec![
            FieldLayout::new("a", 1, 2, FormatterKind::Text),
            FieldLayout::new("b", 3, 2, FormatterKind::Text),
        ]);
        assert_eq!(set.field("b").unwrap().offset, 3);
        set.field_mut("b").unwrap().offset = 5;
        assert_eq!(set.field("b").unwrap().offset, 5);
        assert!(set.field("c").is_none());
    }
}
