//! Library integration tests.

use std::sync::Arc;

use relint::lint::{
    apply_edits, FixType, Linter, Range, RuleCompiler, RuleConfig, RuleStore, Severity, TextEdit,
};
use relint::RelintError;

fn linter(configs: &[RuleConfig]) -> Linter {
    Linter::new(Arc::new(RuleCompiler::default().compile(configs).rules))
}

#[test]
fn error_types_are_public() {
    let err = RelintError::InvalidRule {
        rule: "foo(".into(),
        message: "unclosed group".into(),
    };
    assert!(err.to_string().contains("foo("));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> relint::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use relint::cli::{Cli, Commands};

    let cli = Cli::parse_from(["relint", "rules", "--json"]);
    let Commands::Rules(args) = cli.command else {
        panic!("Expected rules command");
    };
    assert!(args.json);
}

#[test]
fn lint_and_fix_chain_within_a_group() {
    let linter = linter(&[
        RuleConfig::new("quotes", "'", "use double quotes").with_fix("\""),
        RuleConfig::new("quotes", "\"\"", "empty string").with_fix("String::new()"),
    ]);

    let diagnostics = linter.lint("let s = '';", "plaintext");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);

    let fixed = linter.fix_document("let s = '';", "plaintext").unwrap();
    assert_eq!(fixed.text, "let s = String::new();");
    assert!(fixed.remaining.is_empty());
}

#[test]
fn rules_only_apply_to_their_language() {
    let linter = linter(&[RuleConfig::new("style", "var ", "use let").with_language("js")]);

    assert!(linter.lint("var x", "plaintext").is_empty());
    assert_eq!(linter.lint("var x", "js").len(), 1);
}

#[test]
fn reorder_fix_sorts_descending() {
    let linter = linter(&[RuleConfig::new("levels", r"^\d+$", "sort levels")
        .with_fix_type(FixType::ReorderDesc)]);

    let fixed = linter.fix_document("1\n3\n2", "plaintext").unwrap();
    assert_eq!(fixed.text, "3\n2\n1");
}

#[test]
fn store_reload_swaps_rules() {
    let store = RuleStore::new();
    let entries: Vec<serde_yaml::Value> =
        serde_yaml::from_str("- { name: todo, pattern: TODO, message: m }").unwrap();
    store.reload(&entries, Default::default());

    let linter = Linter::from_store(&store);
    assert_eq!(linter.lint("TODO", "plaintext").len(), 1);
}

#[test]
fn apply_edits_rejects_overlap() {
    let edits = vec![
        TextEdit::new(Range::new(0, 3), "x"),
        TextEdit::new(Range::new(2, 4), "y"),
    ];

    let err = apply_edits("abcdef", &edits).unwrap_err();
    assert!(matches!(err, RelintError::InvalidEdit { .. }));
}
