//! Document linting.
//!
//! [`Linter`] runs every rule of a language over a document and collects
//! the resulting diagnostics. Replace rules go through the
//! [`DiagnosticMerger`]; reorder rules go through the order check.

use std::sync::Arc;

use super::diagnostic::Diagnostic;
use super::fix::{apply_edits, FixEngine};
use super::merger::DiagnosticMerger;
use super::order;
use super::registry::{RuleSet, RuleStore};
use super::scanner::{scan, Match};
use crate::error::Result;

/// Upper bound on lint-and-fix passes over one document.
pub const MAX_FIX_PASSES: usize = 16;

/// Lint `text` as `language` with `rules`.
///
/// Diagnostics are sorted by primary range start; diagnostics starting at
/// the same offset keep rule order.
pub fn lint(text: &str, language: &str, rules: &RuleSet) -> Vec<Diagnostic> {
    let mut merger = DiagnosticMerger::new();
    let mut ordering = Vec::new();

    for rule in rules.for_language(language) {
        if rule.fix_type.is_reorder() {
            let matches: Vec<Match<'_>> = scan(text, rule).collect();
            if let Some(diag) = order::check(rule, &matches) {
                ordering.push(diag);
            }
        } else {
            for m in scan(text, rule) {
                merger.add(rule, m.range);
            }
        }
    }

    let mut diagnostics = merger.finish();
    diagnostics.extend(ordering);
    diagnostics.sort_by_key(|d| d.range.start);

    tracing::debug!(
        "Linted {} bytes as '{}': {} diagnostic(s)",
        text.len(),
        language,
        diagnostics.len()
    );
    diagnostics
}

/// Result of fixing a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDocument {
    /// The fixed text.
    pub text: String,
    /// Edits applied across all passes.
    pub edits: usize,
    /// Passes that applied at least one edit.
    pub passes: usize,
    /// Diagnostics remaining in the fixed text.
    pub remaining: Vec<Diagnostic>,
}

impl FixedDocument {
    /// Whether any edit was applied.
    pub fn changed(&self) -> bool {
        self.edits > 0
    }
}

/// Lints documents against one rule batch.
#[derive(Debug, Clone)]
pub struct Linter {
    rules: Arc<RuleSet>,
}

impl Linter {
    /// Create a linter over `rules`.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Create a linter over the current batch of `store`.
    pub fn from_store(store: &RuleStore) -> Self {
        Self::new(store.snapshot())
    }

    /// The rule batch in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Lint `text` as `language`.
    pub fn lint(&self, text: &str, language: &str) -> Vec<Diagnostic> {
        lint(text, language, &self.rules)
    }

    /// Fix engine for documents of `language`.
    pub fn fix_engine<'s>(&'s self, language: &'s str) -> FixEngine<'s> {
        FixEngine::new(&self.rules, language)
    }

    /// Repeatedly lint and apply fix-all until no edit remains or
    /// [`MAX_FIX_PASSES`] passes have run.
    pub fn fix_document(&self, text: &str, language: &str) -> Result<FixedDocument> {
        let engine = self.fix_engine(language);
        let mut current = text.to_string();
        let mut edits = 0;
        let mut passes = 0;

        loop {
            let diagnostics = self.lint(&current, language);
            if passes == MAX_FIX_PASSES {
                tracing::warn!(
                    "Stopped fixing after {} passes with {} diagnostic(s) left",
                    MAX_FIX_PASSES,
                    diagnostics.len()
                );
                return Ok(FixedDocument {
                    text: current,
                    edits,
                    passes,
                    remaining: diagnostics,
                });
            }

            let batch = engine.fix_all(&current, &diagnostics);
            if batch.is_empty() {
                return Ok(FixedDocument {
                    text: current,
                    edits,
                    passes,
                    remaining: diagnostics,
                });
            }

            current = apply_edits(&current, &batch)?;
            edits += batch.len();
            passes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::compiler::{RuleCompiler, RuleConfig};
    use crate::lint::range::Range;
    use crate::lint::rule::FixType;

    fn linter(configs: &[RuleConfig]) -> Linter {
        Linter::new(Arc::new(RuleCompiler::default().compile(configs).rules))
    }

    #[test]
    fn lints_only_matching_language() {
        let linter = linter(&[
            RuleConfig::new("todo", "TODO", "resolve").with_language("markdown"),
            RuleConfig::new("fixme", "FIXME", "resolve"),
        ]);
        let text = "TODO FIXME";

        let plain = linter.lint(text, "plaintext");
        assert_eq!(plain.len(), 1);
        assert_eq!(plain[0].code, "fixme");

        let markdown = linter.lint(text, "markdown");
        assert_eq!(markdown.len(), 1);
        assert_eq!(markdown[0].code, "todo");
    }

    #[test]
    fn diagnostics_sorted_by_position() {
        let linter = linter(&[
            RuleConfig::new("b", "bbb", "m"),
            RuleConfig::new("a", "aaa", "m"),
        ]);

        let diagnostics = linter.lint("aaa bbb aaa", "plaintext");
        let starts: Vec<_> = diagnostics.iter().map(|d| d.range.start).collect();
        assert_eq!(starts, vec![0, 4, 8]);
    }

    #[test]
    fn ordered_imports_are_silent() {
        let linter = linter(&[RuleConfig::new("imports", r"^import \w+$", "sort imports")
            .with_fix_type(FixType::ReorderAsc)]);

        assert!(linter.lint("import a\nimport b\nimport c", "plaintext").is_empty());
        let diagnostics = linter.lint("import b\nimport a\nimport c", "plaintext");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].related.len(), 2);
    }

    #[test]
    fn no_rules_no_diagnostics() {
        let linter = linter(&[]);
        assert!(linter.lint("anything", "plaintext").is_empty());
    }

    #[test]
    fn fix_document_reaches_clean_state() {
        let linter = linter(&[RuleConfig::new(
            "assert",
            r"assert\((.+), (.+)\)",
            "use assert statement",
        )
        .with_fix("assert $1: $2")]);

        let fixed = linter
            .fix_document("x\nassert(false, \"x\")\n", "plaintext")
            .unwrap();

        assert_eq!(fixed.text, "x\nassert false: \"x\"\n");
        assert_eq!(fixed.edits, 1);
        assert_eq!(fixed.passes, 1);
        assert!(fixed.remaining.is_empty());
        assert!(fixed.changed());
    }

    #[test]
    fn fix_document_sorts_and_rewrites() {
        let linter = linter(&[
            RuleConfig::new("imports", r"^import (\w+);?$", "sort imports")
                .with_fix("$1")
                .with_fix_type(FixType::ReorderAsc),
            RuleConfig::new("semicolon", r"^(import \w+)$", "missing semicolon")
                .with_fix("$1;"),
        ]);

        let fixed = linter
            .fix_document("import b\nimport a;", "plaintext")
            .unwrap();

        assert_eq!(fixed.text, "import a;\nimport b;");
        assert!(fixed.remaining.is_empty());
    }

    #[test]
    fn fix_document_leaves_unfixable_diagnostics() {
        let linter = linter(&[RuleConfig::new("todo", "TODO", "resolve")]);

        let fixed = linter.fix_document("TODO", "plaintext").unwrap();

        assert!(!fixed.changed());
        assert_eq!(fixed.text, "TODO");
        assert_eq!(fixed.remaining[0].range, Range::new(0, 4));
    }

    #[test]
    fn linter_uses_store_snapshot() {
        let store = RuleStore::new();
        store.replace(RuleCompiler::default().compile(&[RuleConfig::new("x", "x", "m")]));
        let linter = Linter::from_store(&store);

        store.replace(RuleCompiler::default().compile(&[]));

        assert_eq!(linter.lint("x", "plaintext").len(), 1);
        assert!(Linter::from_store(&store).lint("x", "plaintext").is_empty());
    }
}
