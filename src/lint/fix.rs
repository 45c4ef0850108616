//! Automatic fix computation and application.
//!
//! [`FixEngine`] turns diagnostics back into [`TextEdit`]s:
//!
//! - **replace** groups rewrite the text under the diagnostic by applying
//!   every replace rule of the group in turn, repeating until nothing
//!   matches, a round changes nothing, or [`MAX_FIX_ITERATIONS`] rounds
//!   have run. Rules of one group may expose
//!   each other's matches, so a single pass is not enough.
//! - **reorder** rules permute the diagnostic's spans into sorted order.
//!   The edits of one permutation all refer to the original text and must
//!   be applied together.
//!
//! [`apply_edits`] writes a non-overlapping edit list into a text in one
//! pass, or fails without producing partial output.

use serde::Serialize;

use super::diagnostic::Diagnostic;
use super::order::compare;
use super::range::Range;
use super::registry::RuleSet;
use super::rule::{Fix, Rule};
use crate::error::{RelintError, Result};

/// Upper bound on rewrite rounds for one replace fix.
pub const MAX_FIX_ITERATIONS: usize = 64;

/// Replace the text at `range` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Byte range in the original text.
    pub range: Range,
    /// Replacement text.
    pub replacement: String,
}

impl TextEdit {
    /// Create a new edit.
    pub fn new(range: Range, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Outcome of the bounded rewrite loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Rewritten text.
    pub text: String,
    /// Rounds in which at least one rule matched.
    pub iterations: usize,
}

/// Rewrite `text` with `fixes` until no fix matches or a round leaves the
/// text unchanged, at most [`MAX_FIX_ITERATIONS`] rounds.
///
/// Returns `None` when no fix matched at all.
pub fn rewrite(fixes: &[Fix<'_>], text: &str) -> Option<Rewrite> {
    let mut current = text.to_string();
    let mut iterations = 0;

    let mut settled = false;
    for _ in 0..MAX_FIX_ITERATIONS {
        let before = current.clone();
        let mut matched = false;
        for fix in fixes {
            if fix.regex.is_match(&current) {
                matched = true;
                current = fix.apply(&current).into_owned();
            }
        }
        if !matched {
            settled = true;
            break;
        }
        iterations += 1;
        if current == before {
            settled = true;
            break;
        }
    }

    if !settled {
        tracing::warn!(
            "Fix did not settle after {} iterations; keeping the last result",
            MAX_FIX_ITERATIONS
        );
    }

    (iterations > 0).then_some(Rewrite {
        text: current,
        iterations,
    })
}

/// Computes fixes for one document language against a rule set.
pub struct FixEngine<'s> {
    rules: &'s RuleSet,
    language: &'s str,
}

impl<'s> FixEngine<'s> {
    /// Create a fix engine for documents of `language`.
    pub fn new(rules: &'s RuleSet, language: &'s str) -> Self {
        Self { rules, language }
    }

    /// Edits fixing `target`.
    ///
    /// `diagnostics` is the full diagnostic list of the document; replace
    /// fixes widen their edit range over every diagnostic of the same group
    /// connected to `target`.
    pub fn fix_diagnostic(
        &self,
        text: &str,
        target: &Diagnostic,
        diagnostics: &[Diagnostic],
    ) -> Vec<TextEdit> {
        let group = self.rules.group(&target.code, self.language);
        let Some(origin) = group
            .iter()
            .find(|r| r.id == target.rule_id)
            .or_else(|| group.first())
        else {
            return vec![];
        };

        if origin.fix_type.is_reorder() {
            self.reorder(text, origin, target)
        } else {
            // Reorder templates only build sort tokens and never rewrite text
            let replacers: Vec<&Rule> = group
                .iter()
                .copied()
                .filter(|r| !r.fix_type.is_reorder())
                .collect();
            let range = connected_range(target, diagnostics);
            self.replace(text, &replacers, range).into_iter().collect()
        }
    }

    /// Edit rewriting `range` with every replace rule of the language.
    pub fn fix_range(&self, text: &str, range: Range) -> Vec<TextEdit> {
        let rules: Vec<&Rule> = self
            .rules
            .for_language(self.language)
            .filter(|r| !r.fix_type.is_reorder())
            .collect();
        self.replace(text, &rules, range).into_iter().collect()
    }

    /// Non-overlapping edits fixing every diagnostic, sorted by position.
    ///
    /// All fixes are computed against the same text. A diagnostic whose
    /// edits would overlap edits already accepted is skipped as a whole; a
    /// later pass picks it up.
    pub fn fix_all(&self, text: &str, diagnostics: &[Diagnostic]) -> Vec<TextEdit> {
        let mut ordered: Vec<&Diagnostic> = diagnostics.iter().collect();
        ordered.sort_by_key(|d| d.effective_range());

        let mut accepted: Vec<TextEdit> = Vec::new();
        for diag in ordered {
            let edits = self.fix_diagnostic(text, diag, diagnostics);
            let conflicts = edits
                .iter()
                .any(|e| accepted.iter().any(|a| overlaps(&a.range, &e.range)));
            if conflicts {
                tracing::debug!("Skipping overlapping fix for '{}' at {}", diag.code, diag.range);
                continue;
            }
            accepted.extend(edits);
        }

        accepted.sort_by_key(|e| e.range);
        accepted
    }

    fn replace(&self, text: &str, rules: &[&Rule], range: Range) -> Option<TextEdit> {
        let original = range.slice(text)?;
        let fixes: Vec<Fix<'_>> = rules.iter().filter_map(|r| r.fix()).collect();
        let result = rewrite(&fixes, original)?;
        tracing::debug!(
            "Rewrote {} in {} iteration(s)",
            range,
            result.iterations
        );
        (result.text != original).then(|| TextEdit::new(range, result.text))
    }

    fn reorder(&self, text: &str, rule: &Rule, target: &Diagnostic) -> Vec<TextEdit> {
        let Some(fix) = rule.fix() else {
            return vec![];
        };

        let mut spans: Vec<Range> = target.ranges().collect();
        spans.sort();
        let Some(contents) = spans
            .iter()
            .map(|r| r.slice(text))
            .collect::<Option<Vec<&str>>>()
        else {
            return vec![];
        };
        let tokens: Vec<String> = contents.iter().map(|c| fix.sort_token(c)).collect();

        let mut permutation: Vec<usize> = (0..spans.len()).collect();
        permutation.sort_by(|&a, &b| compare(&tokens[a], &tokens[b], rule.fix_type));
        if permutation.iter().enumerate().all(|(i, &p)| i == p) {
            return vec![];
        }

        spans
            .iter()
            .zip(&permutation)
            .map(|(span, &source)| TextEdit::new(*span, contents[source]))
            .collect()
    }
}

/// Union of `target` with every same-group diagnostic reachable through
/// intersecting effective ranges.
fn connected_range(target: &Diagnostic, diagnostics: &[Diagnostic]) -> Range {
    let mut range = target.effective_range();
    loop {
        let widened = diagnostics
            .iter()
            .filter(|d| d.code == target.code)
            .map(Diagnostic::effective_range)
            .filter(|r| r.intersects(&range))
            .fold(range, |acc, r| acc.union(&r));
        if widened == range {
            return range;
        }
        range = widened;
    }
}

/// Whether two edit ranges conflict. Insertions at the same point conflict;
/// ranges that only touch do not.
fn overlaps(a: &Range, b: &Range) -> bool {
    (a.start < b.end && b.start < a.end) || (a.is_empty() && b.is_empty() && a.start == b.start)
}

/// Apply a set of non-overlapping edits to `text`.
///
/// Every edit refers to the original text. Edits are applied in order of
/// position in one pass; if any edit is out of bounds, splits a character,
/// or overlaps another, nothing is applied.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|e| e.range);

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in sorted {
        let invalid = |message: &str| RelintError::InvalidEdit {
            start: edit.range.start,
            end: edit.range.end,
            message: message.to_string(),
        };
        if edit.range.start < cursor {
            return Err(invalid("overlaps a previous edit"));
        }
        if edit.range.slice(text).is_none() {
            return Err(invalid("range is outside the text"));
        }
        result.push_str(&text[cursor..edit.range.start]);
        result.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    result.push_str(&text[cursor..]);

    Ok(result)
}
