//! Lint diagnostic messages.
//!
//! This module provides the [`Diagnostic`] type for violations found while
//! scanning a document. A diagnostic has a primary range and may fold in
//! further matches of the same group as related ranges.

use serde::Serialize;

use super::range::Range;
use super::rule::{RuleId, Severity};

/// Label attached to every related range.
pub const RELATED_LABEL: &str = "related match";

/// A violation reported for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Primary range.
    pub range: Range,
    /// Human-readable message.
    pub message: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Group name of the rule(s) that produced this diagnostic.
    pub code: String,
    /// The rule that first produced this diagnostic.
    pub rule_id: RuleId,
    /// Additional matches folded into this diagnostic.
    pub related: Vec<RelatedInfo>,
}

/// A further match folded into a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInfo {
    /// Location of the related match.
    pub range: Range,
    /// Message explaining the relationship.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        range: Range,
        code: impl Into<String>,
        rule_id: RuleId,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            range,
            message: message.into(),
            severity,
            code: code.into(),
            rule_id,
            related: vec![],
        }
    }

    /// Add a related range.
    pub fn with_related(mut self, range: Range) -> Self {
        self.push_related(range);
        self
    }

    /// Append a related range.
    pub fn push_related(&mut self, range: Range) {
        self.related.push(RelatedInfo {
            range,
            message: RELATED_LABEL.to_string(),
        });
    }

    /// Primary range unioned with every related range.
    pub fn effective_range(&self) -> Range {
        self.related
            .iter()
            .fold(self.range, |acc, r| acc.union(&r.range))
    }

    /// Primary range followed by the related ranges.
    pub fn ranges(&self) -> impl Iterator<Item = Range> + '_ {
        std::iter::once(self.range).chain(self.related.iter().map(|r| r.range))
    }
}
