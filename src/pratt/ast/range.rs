//! Position and range tracking for source locations
//!
//! This module defines the data structures for representing positions and ranges in source
//! text, as well as utilities for converting byte offsets to line/column positions.
//!
//! ## Types
//!
//! - [`Position`] - A line:column position in source text
//! - [`SourceRange`] - A half-open byte span with its start/end positions
//! - [`SourceLocation`] - Utility for converting byte offsets to positions
//!
//! ## Key Design
//!
//! - **Mandatory ranges**: every token and AST node carries a `SourceRange`, never `None`
//! - **Byte spans are authoritative**: containment and covering work on byte offsets; the
//!   line/column positions are derived data for humans and tooling
//! - **Never used for parse decisions**: the engine only reads ranges to bind them to nodes
//! - **Efficient conversion**: O(log n) binary search for byte-to-position conversion

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// A position in source text (0-based line and column, column in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A half-open span of source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// True when `other` lies entirely within this range.
    pub fn contains(&self, other: &SourceRange) -> bool {
        self.span.start <= other.span.start && other.span.end <= self.span.end
    }

    pub fn is_empty(&self) -> bool {
        self.span.start >= self.span.end
    }

    pub fn len(&self) -> usize {
        self.span.end.saturating_sub(self.span.start)
    }

    /// The range from the start of `self` to the end of `end`.
    pub fn cover(&self, end: &SourceRange) -> SourceRange {
        if end.span.end <= self.span.end {
            return self.clone();
        }
        SourceRange::new(self.span.start..end.span.end, self.start, end.end)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for SourceRange {
    fn default() -> Self {
        Self::new(0..0, Position::default(), Position::default())
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line, column)
    }

    /// Convert a byte range to a source range
    pub fn range(&self, span: ByteRange<usize>) -> SourceRange {
        let start = self.byte_to_position(span.start);
        let end = self.byte_to_position(span.end);
        SourceRange::new(span, start, end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
