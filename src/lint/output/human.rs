//! Human-readable output formatter.
//!
//! Formats lint diagnostics for terminal display with optional color support.

use console::style;
use std::io::Write;

use super::{FileReport, LintFormatter, Summary};
use crate::lint::Severity;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_prefix(&self, severity: Severity) -> String {
        let label = severity.to_string();
        if !self.use_color {
            return label;
        }
        let styled = match severity {
            Severity::Error => style(label).red().bold(),
            Severity::Warning => style(label).yellow().bold(),
            Severity::Information => style(label).blue(),
            Severity::Hint => style(label).dim(),
        };
        styled.force_styling(true).to_string()
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(&self, reports: &[FileReport<'_>], writer: &mut W) -> std::io::Result<()> {
        for report in reports {
            for diag in &report.diagnostics {
                // Header line: error[group]: message
                writeln!(
                    writer,
                    "{}[{}]: {}",
                    self.severity_prefix(diag.severity),
                    diag.code,
                    diag.message
                )?;

                let span = report.span(diag.range);
                writeln!(
                    writer,
                    "  --> {}:{}:{}",
                    span.file.display(),
                    span.start_line,
                    span.start_col
                )?;

                for related in &diag.related {
                    let span = report.span(related.range);
                    writeln!(
                        writer,
                        "   = note: {} ({}:{}:{})",
                        related.message,
                        span.file.display(),
                        span.start_line,
                        span.start_col
                    )?;
                }

                writeln!(writer)?;
            }
        }

        let summary = Summary::of(reports);
        if summary.errors > 0 || summary.warnings > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                summary.errors, summary.warnings
            )?;
        }

        Ok(())
    }
}
