//! Position and range types for source locations.

/// Byte offset range in a source file.
///
/// Used internally for efficient text manipulation. Byte offsets are
/// converted to line/column [`Position`]s through a [`LineIndex`] when
/// presenting to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl OffsetRange {
    /// Create a new offset range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of this range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Position in a source file (editor coordinates, 0-indexed).
///
/// This represents a position as understood by editors:
/// - `line` is 0-indexed (first line is 0)
/// - `character` is 0-indexed UTF-16 code units from line start
///
/// Note: editor protocols count character offsets in UTF-16 code units,
/// not bytes or Unicode codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset within the line (0-indexed, UTF-16 code units)
    pub character: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

/// Range in a source file (editor coordinates).
///
/// A range represents a span of text from `start` (inclusive) to `end`
/// (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Range {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The zero range: start and end both at line 0, character 0.
    ///
    /// Used as the last-resort anchor when a violation cannot be mapped
    /// back to the source text.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            start: Position::new(0, 0),
            end: Position::new(0, 0),
        }
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.character == self.end.character
    }
}

/// Line-start offset table for one document, built once from the original
/// (un-neutralized) text.
///
/// Converts byte offsets into editor [`Position`]s, counting characters in
/// UTF-16 code units as editors expect. Offsets past the end of the text
/// clamp to the final position; offsets inside a multibyte character round
/// down to its start; the empty document maps everything to 0,0.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    /// The indexed text; borrowed for UTF-16 column conversion.
    text: &'a str,
    /// Byte offset of the start of every line. Always contains at least `[0]`.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Build the index by scanning the text for line breaks.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { text, line_starts }
    }

    /// Number of lines in the indexed text.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a position, clamping to document bounds.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.text[line_start..offset].encode_utf16().count();
        Position::new(line as u32, character as u32)
    }

    /// Convert a byte offset range into an editor range.
    #[must_use]
    pub fn range(&self, offsets: OffsetRange) -> Range {
        Range::new(self.position(offsets.start), self.position(offsets.end))
    }
}
