//! relint - Regex lint rules with automatic fixes.
//!
//! relint reads declarative rules from `.relint.yml`, scans documents with
//! them, merges related matches into diagnostics and rewrites offending
//! text through replace and reorder fixes.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration discovery, loading and merging
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Rule compilation, scanning, diagnostics and fixes
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use relint::lint::{Linter, RuleCompiler, RuleConfig};
//!
//! let compiled = RuleCompiler::default().compile(&[
//!     RuleConfig::new("trailing", r"[ \t]+$", "trailing whitespace").with_fix(""),
//! ]);
//! let linter = Linter::new(Arc::new(compiled.rules));
//!
//! let fixed = linter.fix_document("a  \nb\t\n", "plaintext").unwrap();
//! assert_eq!(fixed.text, "a\nb\n");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod ui;

pub use error::{RelintError, Result};
