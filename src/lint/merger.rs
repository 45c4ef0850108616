//! Merging matches into diagnostics.
//!
//! Matches of rules sharing a group are folded together: a match that
//! touches an existing diagnostic of its group extends that diagnostic
//! instead of producing a new one. The result is the smallest set of
//! diagnostics per group such that connected matches are reported together.

use super::diagnostic::Diagnostic;
use super::range::Range;
use super::rule::Rule;

/// Accumulates diagnostics for one document.
#[derive(Debug, Default)]
pub struct DiagnosticMerger {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a match of `rule` at `range` into the diagnostics.
    ///
    /// The first diagnostic of the same group whose effective range touches
    /// `range` absorbs it: into the primary range when they intersect,
    /// otherwise into an intersecting related range, otherwise as a new
    /// related range. Without such a diagnostic a new one is created.
    pub fn add(&mut self, rule: &Rule, range: Range) {
        let existing = self
            .diagnostics
            .iter()
            .position(|d| d.code == rule.name && d.effective_range().intersects(&range));

        match existing {
            Some(index) => {
                let diag = &mut self.diagnostics[index];
                if diag.range.intersects(&range) {
                    diag.range = diag.range.union(&range);
                } else {
                    match diag.related.iter_mut().find(|r| r.range.intersects(&range)) {
                        Some(related) => related.range = related.range.union(&range),
                        None => diag.push_related(range),
                    }
                }
            }
            None => self.diagnostics.push(Diagnostic::new(
                range,
                rule.name.clone(),
                rule.id.clone(),
                rule.severity,
                rule.message.clone(),
            )),
        }
    }

    /// Number of diagnostics so far.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether no diagnostic was produced.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The merged diagnostics, in creation order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
