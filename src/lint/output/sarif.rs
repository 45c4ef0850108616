//! SARIF output formatter.
//!
//! SARIF (Static Analysis Results Interchange Format) is an OASIS standard
//! for static analysis tools, supported by GitHub, VS Code, and other tools.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use super::{FileReport, LintFormatter};
use crate::lint::{Range, Severity};

/// SARIF version we generate.
const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Formats lint output as SARIF.
pub struct SarifFormatter {
    /// Tool name to report.
    pub tool_name: String,
    /// Tool version to report.
    pub tool_version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    related_locations: Vec<SarifRelatedLocation>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRelatedLocation {
    id: usize,
    message: SarifMessage,
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
}

impl SarifFormatter {
    /// Create a new SARIF formatter.
    pub fn new(tool_name: impl Into<String>, tool_version: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_version: tool_version.into(),
        }
    }

    fn severity_to_level(severity: Severity) -> &'static str {
        match severity {
            Severity::Hint | Severity::Information => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    fn physical_location(report: &FileReport<'_>, range: Range) -> SarifPhysicalLocation {
        let span = report.span(range);
        SarifPhysicalLocation {
            artifact_location: SarifArtifactLocation {
                uri: span.file.display().to_string(),
            },
            region: SarifRegion {
                start_line: span.start_line,
                start_column: span.start_col,
                end_line: span.end_line,
                end_column: span.end_col,
            },
        }
    }
}

impl LintFormatter for SarifFormatter {
    fn format<W: Write>(&self, reports: &[FileReport<'_>], writer: &mut W) -> std::io::Result<()> {
        // One rule entry per group, described by its first message
        let mut groups: BTreeMap<&str, &str> = BTreeMap::new();
        for diag in reports.iter().flat_map(|r| &r.diagnostics) {
            groups.entry(&diag.code).or_insert(&diag.message);
        }
        let rules = groups
            .into_iter()
            .map(|(code, message)| SarifRule {
                id: code.to_string(),
                short_description: SarifMessage {
                    text: message.to_string(),
                },
            })
            .collect();

        let results = reports
            .iter()
            .flat_map(|report| {
                report.diagnostics.iter().map(move |d| SarifResult {
                    rule_id: d.code.clone(),
                    level: Self::severity_to_level(d.severity),
                    message: SarifMessage {
                        text: d.message.clone(),
                    },
                    locations: vec![SarifLocation {
                        physical_location: Self::physical_location(report, d.range),
                    }],
                    related_locations: d
                        .related
                        .iter()
                        .enumerate()
                        .map(|(id, r)| SarifRelatedLocation {
                            id,
                            message: SarifMessage {
                                text: r.message.clone(),
                            },
                            physical_location: Self::physical_location(report, r.range),
                        })
                        .collect(),
                })
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: self.tool_name.clone(),
                        version: self.tool_version.clone(),
                        rules,
                    },
                },
                results,
            }],
        };

        serde_json::to_writer_pretty(writer, &log).map_err(std::io::Error::other)?;

        Ok(())
    }
}
