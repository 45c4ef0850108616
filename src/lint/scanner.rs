//! Windowed regex scanning.
//!
//! [`scan`] runs one rule over a document and lazily yields every match.
//! Rules with `max_lines > 0` are run over a sliding window of that many
//! lines instead of the whole text, which bounds the cost of expensive
//! patterns on large documents.
//!
//! The window slides one line at a time. A window that is not the last one
//! only reports matches that start on its first line; the last window
//! reports everything it finds. Each match is therefore reported once and in
//! document order.
//!
//! A match that would need more than `max_lines` lines of context is never
//! seen: with `max_lines = 1` a pattern spanning two lines reports nothing.
//! Rules that need to see across lines must raise `max_lines` or use `0`
//! (whole document).

use regex::CaptureMatches;

use super::range::Range;
use super::rule::Rule;
use super::span::LineIndex;

/// One regex occurrence in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    /// Document range used for diagnostics; see [`Match::effective_len`].
    pub range: Range,
    /// The matched text.
    pub text: &'t str,
    /// Capture groups, group 0 first. `None` for groups that did not
    /// participate.
    pub groups: Vec<Option<&'t str>>,
}

impl<'t> Match<'t> {
    /// Document offset where the match starts.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Length of the longest capture group, used to size the range.
    pub fn effective_len(&self) -> usize {
        self.range.len()
    }
}

/// Scan `text` with `rule`, yielding matches in document order.
///
/// Every call starts from a fresh cursor; scans never share state.
pub fn scan<'r, 't>(text: &'t str, rule: &'r Rule) -> Scan<'r, 't> {
    let lines = LineIndex::new(text);
    let line_count = lines.line_count();
    let window_lines = if rule.max_lines == 0 || rule.max_lines >= line_count {
        line_count
    } else {
        rule.max_lines
    };

    Scan {
        rule,
        text,
        last_line: line_count - window_lines,
        window_lines,
        lines,
        next_line: 0,
        window: None,
    }
}

/// Lazy match stream for one rule over one document.
pub struct Scan<'r, 't> {
    rule: &'r Rule,
    text: &'t str,
    lines: LineIndex,
    window_lines: usize,
    /// First line of the last window.
    last_line: usize,
    next_line: usize,
    window: Option<Window<'r, 't>>,
}

struct Window<'r, 't> {
    offset: usize,
    /// Matches starting at or after this offset belong to a later window.
    report_before: usize,
    matches: CaptureMatches<'r, 't>,
}

impl<'r, 't> Scan<'r, 't> {
    fn open_window(&self, line: usize) -> Window<'r, 't> {
        let text: &'t str = self.text;
        let rule: &'r Rule = self.rule;
        let last = line + self.window_lines - 1;
        let offset = self.lines.line_start(line);
        let end = if last + 1 == self.lines.line_count() {
            text.len()
        } else {
            self.lines.line_end(text, last)
        };
        let report_before = if line == self.last_line {
            usize::MAX
        } else {
            self.lines.line_start(line + 1)
        };

        tracing::trace!(
            "Scanning '{}' over lines {}..={} ({}..{})",
            rule.id,
            line,
            last,
            offset,
            end
        );

        Window {
            offset,
            report_before,
            matches: rule.regex.captures_iter(&text[offset..end]),
        }
    }
}

impl<'r, 't> Iterator for Scan<'r, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(window) = self.window.as_mut() {
                if let Some(caps) = window.matches.next() {
                    let whole = caps.get(0)?;
                    let start = window.offset + whole.start();
                    if start >= window.report_before {
                        self.window = None;
                        continue;
                    }
                    let groups: Vec<Option<&'t str>> =
                        caps.iter().map(|g| g.map(|m| m.as_str())).collect();
                    let len = groups.iter().flatten().map(|g| g.len()).max().unwrap_or(0);
                    return Some(Match {
                        range: Range::new(start, start + len),
                        text: whole.as_str(),
                        groups,
                    });
                }
                self.window = None;
            }

            if self.next_line > self.last_line {
                return None;
            }
            let line = self.next_line;
            self.next_line += 1;
            self.window = Some(self.open_window(line));
        }
    }
}
