//! Regex linting and automatic fixes.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Compiler** - Rule configuration to validated rules ([`RuleCompiler`])
//! - **Rule sets** - Immutable compiled batches with a group index ([`RuleSet`], [`RuleStore`])
//! - **Scanner** - Lazy windowed matching of one rule ([`scan`])
//! - **Diagnostics** - Merged violation reports ([`Diagnostic`], [`DiagnosticMerger`])
//! - **Fixes** - Diagnostics back to text edits ([`FixEngine`], [`apply_edits`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use relint::lint::{Linter, RuleCompiler, RuleConfig};
//!
//! let compiled = RuleCompiler::default().compile(&[
//!     RuleConfig::new("assert", r"assert\((.+), (.+)\)", "use assert statement")
//!         .with_fix("assert $1: $2"),
//! ]);
//! let linter = Linter::new(Arc::new(compiled.rules));
//!
//! let diagnostics = linter.lint(r#"assert(false, "x")"#, "plaintext");
//! assert_eq!(diagnostics.len(), 1);
//!
//! let fixed = linter.fix_document(r#"assert(false, "x")"#, "plaintext").unwrap();
//! assert_eq!(fixed.text, r#"assert false: "x""#);
//! ```

pub mod compiler;
pub mod diagnostic;
pub mod engine;
pub mod fix;
pub mod merger;
pub mod order;
pub mod output;
pub mod range;
pub mod registry;
pub mod rule;
pub mod scanner;
pub mod schema;
pub mod span;
pub mod template;

pub use compiler::{Compiled, DroppedRule, RuleCompiler, RuleConfig, RuleDefaults, DEFAULT_LANGUAGE};
pub use diagnostic::{Diagnostic, RelatedInfo, RELATED_LABEL};
pub use engine::{lint, FixedDocument, Linter, MAX_FIX_PASSES};
pub use fix::{apply_edits, FixEngine, TextEdit, MAX_FIX_ITERATIONS};
pub use merger::DiagnosticMerger;
pub use output::{
    FileReport, HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, SarifFormatter,
    Summary,
};
pub use range::Range;
pub use registry::{RuleSet, RuleStore};
pub use rule::{Fix, FixType, Flags, Rule, RuleId, Severity};
pub use scanner::{scan, Match};
pub use schema::SchemaGenerator;
pub use span::{LineIndex, Span};
pub use template::Template;
