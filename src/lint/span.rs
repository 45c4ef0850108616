//! Source location spans.
//!
//! Diagnostics carry byte [`Range`]s. This module turns them into
//! line/column [`Span`]s for reporting, and exposes the line table the
//! windowed scanner iterates over.

use std::path::PathBuf;

use super::range::Range;

/// A source location span representing a range in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// File path.
    pub file: PathBuf,
    /// Starting line (1-indexed).
    pub start_line: usize,
    /// Starting column (1-indexed, in characters).
    pub start_col: usize,
    /// Ending line (1-indexed).
    pub end_line: usize,
    /// Ending column (1-indexed, in characters).
    pub end_col: usize,
}

impl Span {
    /// Create a span with precise positions.
    pub fn new(
        file: impl Into<PathBuf>,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            file: file.into(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// Line table for a document.
///
/// Line `n` runs from `starts[n]` up to, but not including, its line break
/// (`\n` or `\r\n`). A document always has at least one line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the line table for `text`.
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte offset where `line` (0-indexed) starts.
    pub fn line_start(&self, line: usize) -> usize {
        self.starts.get(line).copied().unwrap_or(self.len)
    }

    /// Byte offset where `line` ends, excluding its line break.
    pub fn line_end(&self, text: &str, line: usize) -> usize {
        let next = self
            .starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.len + 1);
        let mut end = next.saturating_sub(1).min(self.len);
        if end > self.line_start(line) && text.as_bytes().get(end - 1) == Some(&b'\r') {
            end -= 1;
        }
        end
    }

    /// 0-indexed line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// 1-indexed `(line, column)` for `offset`; columns count characters.
    pub fn position(&self, text: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let start = self.line_start(line);
        let col = text
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start);
        (line + 1, col + 1)
    }

    /// Span for `range` in `file`.
    pub fn span(&self, file: impl Into<PathBuf>, text: &str, range: Range) -> Span {
        let (start_line, start_col) = self.position(text, range.start);
        let (end_line, end_col) = self.position(text, range.end);
        Span::new(file, start_line, start_col, end_line, end_col)
    }
}
