//! JSON output formatter.
//!
//! Formats lint diagnostics as machine-readable JSON for tooling integration.

use serde::Serialize;
use std::io::Write;

use super::{FileReport, LintFormatter, Summary};
use crate::lint::Range;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    file: String,
    code: String,
    rule_id: String,
    severity: String,
    message: String,
    #[serde(flatten)]
    location: JsonLocation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related: Vec<JsonRelated>,
}

#[derive(Serialize)]
struct JsonLocation {
    start: usize,
    end: usize,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
}

#[derive(Serialize)]
struct JsonRelated {
    message: String,
    #[serde(flatten)]
    location: JsonLocation,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }

    fn location(report: &FileReport<'_>, range: Range) -> JsonLocation {
        let span = report.span(range);
        JsonLocation {
            start: range.start,
            end: range.end,
            line: span.start_line,
            column: span.start_col,
            end_line: span.end_line,
            end_column: span.end_col,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(&self, reports: &[FileReport<'_>], writer: &mut W) -> std::io::Result<()> {
        let diagnostics = reports
            .iter()
            .flat_map(|report| {
                report.diagnostics.iter().map(move |d| JsonDiagnostic {
                    file: report.path().display().to_string(),
                    code: d.code.clone(),
                    rule_id: d.rule_id.0.clone(),
                    severity: d.severity.to_string(),
                    message: d.message.clone(),
                    location: Self::location(report, d.range),
                    related: d
                        .related
                        .iter()
                        .map(|r| JsonRelated {
                            message: r.message.clone(),
                            location: Self::location(report, r.range),
                        })
                        .collect(),
                })
            })
            .collect();

        let output = JsonOutput {
            diagnostics,
            summary: Summary::of(reports),
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::output::fixtures;

    fn render(reports: &[FileReport<'_>]) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(reports, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let parsed = render(&[fixtures::report()]);

        assert!(parsed["diagnostics"].is_array());
        assert_eq!(parsed["summary"]["total"], 2);
    }

    #[test]
    fn includes_offsets_and_positions() {
        let parsed = render(&[fixtures::report()]);
        let first = &parsed["diagnostics"][0];

        assert_eq!(first["file"], "src/main.txt");
        assert_eq!(first["code"], "assert");
        assert_eq!(first["rule_id"], "assert-call");
        assert_eq!(first["severity"], "error");
        assert_eq!(first["start"], 10);
        assert_eq!(first["end"], 28);
        assert_eq!(first["line"], 2);
        assert_eq!(first["column"], 1);
        assert_eq!(first["end_column"], 19);
    }

    #[test]
    fn includes_related_ranges() {
        let parsed = render(&[fixtures::report()]);

        let related = &parsed["diagnostics"][0]["related"][0];
        assert_eq!(related["message"], "related match");
        assert_eq!(related["line"], 3);
        assert!(parsed["diagnostics"][1]["related"].is_null());
    }

    #[test]
    fn summary_counts_by_severity() {
        let parsed = render(&[fixtures::report()]);

        assert_eq!(parsed["summary"]["errors"], 1);
        assert_eq!(parsed["summary"]["warnings"], 0);
        assert_eq!(parsed["summary"]["hints"], 1);
    }

    #[test]
    fn empty_report_list() {
        let parsed = render(&[]);
        assert_eq!(parsed["summary"]["total"], 0);
        assert_eq!(parsed["diagnostics"], serde_json::json!([]));
    }
}
