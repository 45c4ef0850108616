//! Ordering checks for reorder rules.
//!
//! A reorder rule does not flag individual matches. Instead, the sequence of
//! its matches is checked against the order of their sort tokens; only an
//! out-of-order sequence is reported, as a single diagnostic covering every
//! match.

use std::cmp::Ordering;

use super::diagnostic::Diagnostic;
use super::rule::{FixType, Rule};
use super::scanner::Match;

/// Index of the first token that breaks the order, if any.
///
/// Tokens are inserted one by one into a sorted list by binary search. Token
/// `i` is in order when its insertion point is `i`, i.e. it sorts after
/// every earlier token. Equal tokens are in order.
pub fn first_inversion<T: Ord>(tokens: &[T], fix_type: FixType) -> Option<usize> {
    let mut sorted: Vec<&T> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let index = sorted.partition_point(|t| compare(*t, token, fix_type) != Ordering::Greater);
        if index != i {
            return Some(i);
        }
        sorted.insert(index, token);
    }
    None
}

/// Whether `tokens` are already sorted for `fix_type`.
pub fn is_ordered<T: Ord>(tokens: &[T], fix_type: FixType) -> bool {
    first_inversion(tokens, fix_type).is_none()
}

/// Ordering of `a` relative to `b` in the target order.
pub(crate) fn compare<T: Ord>(a: &T, b: &T, fix_type: FixType) -> Ordering {
    match fix_type {
        FixType::ReorderDesc => b.cmp(a),
        _ => a.cmp(b),
    }
}

/// Check a reorder rule's matches, in document order.
///
/// Returns one diagnostic when the matches are out of order: the first
/// match is the primary range and every other match is related.
pub fn check(rule: &Rule, matches: &[Match<'_>]) -> Option<Diagnostic> {
    let fix = rule.fix()?;
    if matches.len() < 2 {
        return None;
    }

    let tokens: Vec<String> = matches.iter().map(|m| fix.sort_token(m.text)).collect();
    let inversion = first_inversion(&tokens, rule.fix_type)?;
    tracing::debug!(
        "Rule '{}' out of order at match {} of {}",
        rule.id,
        inversion,
        matches.len()
    );

    let mut diag = Diagnostic::new(
        matches[0].range,
        rule.name.clone(),
        rule.id.clone(),
        rule.severity,
        rule.message.clone(),
    );
    for m in &matches[1..] {
        diag.push_related(m.range);
    }
    Some(diag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::compiler::{RuleCompiler, RuleConfig};
    use crate::lint::range::Range;
    use crate::lint::scanner::scan;

    fn reorder_rule(pattern: &str, fix: Option<&str>, fix_type: FixType) -> Rule {
        let mut config = RuleConfig::new("order", pattern, "out of order").with_fix_type(fix_type);
        config.fix = fix.map(str::to_string);
        RuleCompiler::default().compile_rule(&config).unwrap()
    }

    #[test]
    fn ascending_detects_inversion() {
        assert_eq!(first_inversion(&["b", "a", "c"], FixType::ReorderAsc), Some(1));
        assert!(is_ordered(&["a", "b", "c"], FixType::ReorderAsc));
    }

    #[test]
    fn descending_detects_inversion() {
        assert!(is_ordered(&["c", "b", "a"], FixType::ReorderDesc));
        assert_eq!(first_inversion(&["c", "a", "b"], FixType::ReorderDesc), Some(2));
    }

    #[test]
    fn equal_tokens_are_not_inversions() {
        assert!(is_ordered(&["a", "a", "b"], FixType::ReorderAsc));
        assert!(is_ordered(&["b", "b", "a"], FixType::ReorderDesc));
    }

    #[test]
    fn late_small_token_is_caught() {
        assert_eq!(
            first_inversion(&["b", "c", "d", "a"], FixType::ReorderAsc),
            Some(3)
        );
    }

    #[test]
    fn short_sequences_are_ordered() {
        let empty: [&str; 0] = [];
        assert!(is_ordered(&empty, FixType::ReorderAsc));
        assert!(is_ordered(&["z"], FixType::ReorderAsc));
    }

    #[test]
    fn check_reports_whole_sequence_once() {
        let rule = reorder_rule(r"^import (\w+)$", Some("$1"), FixType::ReorderAsc);
        let text = "import b\nimport a\nimport c";
        let matches: Vec<_> = scan(text, &rule).collect();

        let diag = check(&rule, &matches).unwrap();

        assert_eq!(diag.range, Range::new(0, 8));
        assert_eq!(diag.related.len(), 2);
        assert_eq!(diag.related[0].range, Range::new(9, 17));
        assert_eq!(diag.related[1].range, Range::new(18, 26));
        assert_eq!(diag.code, "order");
    }

    #[test]
    fn check_uses_template_for_tokens() {
        // Whole lines are out of order, but the captured keys are sorted
        let rule = reorder_rule(r"^\w+ = (\d+)$", Some("$1"), FixType::ReorderAsc);
        let text = "zeta = 1\nalpha = 2";
        let matches: Vec<_> = scan(text, &rule).collect();

        assert!(check(&rule, &matches).is_none());
    }

    #[test]
    fn check_ignores_ordered_sequence() {
        let rule = reorder_rule(r"^import \w+$", None, FixType::ReorderAsc);
        let text = "import a\nimport b\nimport c";
        let matches: Vec<_> = scan(text, &rule).collect();

        assert!(check(&rule, &matches).is_none());
    }
}
