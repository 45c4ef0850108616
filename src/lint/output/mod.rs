//! Lint output formatters.
//!
//! This module provides formatters for outputting lint diagnostics
//! in different formats (human-readable, JSON, SARIF). Formatters work on
//! [`FileReport`]s so byte ranges can be turned into line/column positions.

pub mod human;
pub mod json;
pub mod sarif;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::lint::span::{LineIndex, Span};
use crate::lint::{Diagnostic, Range, Severity};

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Sarif,
}

/// Diagnostics for one linted document.
#[derive(Debug, Clone)]
pub struct FileReport<'t> {
    /// Path shown in output; `<stdin>` for standard input.
    pub path: PathBuf,
    /// Document text the diagnostics refer to.
    pub text: &'t str,
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
    lines: LineIndex,
}

impl<'t> FileReport<'t> {
    /// Create a report for `text` at `path`.
    pub fn new(path: impl Into<PathBuf>, text: &'t str, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path: path.into(),
            text,
            diagnostics,
            lines: LineIndex::new(text),
        }
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line/column span of `range` in this document.
    pub fn span(&self, range: Range) -> Span {
        self.lines.span(self.path.clone(), self.text, range)
    }
}

/// Diagnostic counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub information: usize,
    pub hints: usize,
}

impl Summary {
    /// Count the diagnostics of every report.
    pub fn of(reports: &[FileReport<'_>]) -> Self {
        let mut summary = Summary::default();
        for diag in reports.iter().flat_map(|r| &r.diagnostics) {
            summary.total += 1;
            match diag.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Information => summary.information += 1,
                Severity::Hint => summary.hints += 1,
            }
        }
        summary
    }
}

/// Trait for formatting lint output.
pub trait LintFormatter {
    /// Format the reports to the given writer.
    fn format<W: Write>(&self, reports: &[FileReport<'_>], writer: &mut W) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use sarif::SarifFormatter;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::FileReport;
    use crate::lint::{Diagnostic, Range, RuleId, Severity};

    pub const TEXT: &str = "let a = 1\nassert(false, \"x\")\nTODO later\n";

    /// Two diagnostics: an error with a related range, and a hint.
    pub fn report() -> FileReport<'static> {
        let assert = Diagnostic::new(
            Range::new(10, 28),
            "assert",
            RuleId::new("assert-call"),
            Severity::Error,
            "use assert statement",
        )
        .with_related(Range::new(29, 33));
        let todo = Diagnostic::new(
            Range::new(29, 33),
            "todo",
            RuleId::new("TODO"),
            Severity::Hint,
            "resolve TODO",
        );
        FileReport::new("src/main.txt", TEXT, vec![assert, todo])
    }
}
