//! Lint rule definitions.
//!
//! This module provides the core types describing a compiled rule:
//!
//! - [`Rule`] - A validated, compiled rule ready for scanning
//! - [`RuleId`] - Unique identifier for a rule
//! - [`Severity`] - Severity level for diagnostics
//! - [`FixType`] - How a rule's fix rewrites text
//! - [`Flags`] - Regex flags understood by the engine
//! - [`Fix`] - The rewriting view of a rule

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::template::Template;

/// Unique identifier for a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Severity {
    /// Hint, usually rendered faintly.
    #[serde(alias = "hint", alias = "HINT")]
    Hint,
    /// Informational message.
    #[serde(alias = "information", alias = "INFORMATION", alias = "info", alias = "Info")]
    Information,
    /// Warning that should be addressed.
    #[default]
    #[serde(alias = "warning", alias = "WARNING")]
    Warning,
    /// Error.
    #[serde(alias = "error", alias = "ERROR")]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Information => write!(f, "information"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// How a rule's fix rewrites matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    /// Substitute each match with the expanded template.
    #[default]
    Replace,
    /// Permute matched spans into ascending order of their sort tokens.
    ReorderAsc,
    /// Permute matched spans into descending order of their sort tokens.
    ReorderDesc,
}

impl FixType {
    /// Whether this fix permutes spans instead of rewriting them.
    pub fn is_reorder(&self) -> bool {
        matches!(self, FixType::ReorderAsc | FixType::ReorderDesc)
    }
}

impl std::fmt::Display for FixType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixType::Replace => write!(f, "replace"),
            FixType::ReorderAsc => write!(f, "reorder_asc"),
            FixType::ReorderDesc => write!(f, "reorder_desc"),
        }
    }
}

/// Regex flags understood by the engine.
///
/// Parsed from a string of flag characters. Supported characters are
/// `g` (global, always on), `i` (case-insensitive), `m` (multi-line
/// anchors), `s` (dot matches newline), `u` (unicode, always on) and `x`
/// (ignore pattern whitespace). Anything else is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

/// Flag characters the engine accepts.
pub const SUPPORTED_FLAGS: &str = "gimsux";

/// Flags applied when neither the rule nor the configuration sets any.
pub const DEFAULT_FLAGS: &str = "gim";

impl Flags {
    /// Parse a flag string, ignoring unsupported characters.
    pub fn parse(flags: &str) -> Self {
        let mut parsed = Self::default();
        for c in flags.chars().filter(|c| SUPPORTED_FLAGS.contains(*c)) {
            match c {
                'i' => parsed.case_insensitive = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_matches_new_line = true,
                'x' => parsed.ignore_whitespace = true,
                _ => {}
            }
        }
        parsed
    }

    /// Compile `pattern` with these flags.
    pub fn build(&self, pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .crlf(true)
            .build()
    }
}

impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g")?;
        if self.case_insensitive {
            write!(f, "i")?;
        }
        if self.multi_line {
            write!(f, "m")?;
        }
        if self.dot_matches_new_line {
            write!(f, "s")?;
        }
        write!(f, "u")?;
        if self.ignore_whitespace {
            write!(f, "x")?;
        }
        Ok(())
    }
}

/// A compiled rule.
///
/// Rules are immutable once compiled; a configuration change produces a
/// whole new batch (see [`RuleSet`](super::registry::RuleSet)).
#[derive(Debug, Clone)]
pub struct Rule {
    /// Stable identifier: the explicit `id`, or the pattern source.
    pub id: RuleId,
    /// Language identifiers this rule applies to.
    pub languages: Vec<String>,
    /// Group name shared by rules that merge and fix together.
    pub name: String,
    /// Pattern source.
    pub pattern: String,
    /// Effective flags.
    pub flags: Flags,
    /// Compiled pattern.
    pub regex: Regex,
    /// Message reported for violations.
    pub message: String,
    /// Severity reported for violations.
    pub severity: Severity,
    /// How the fix rewrites text.
    pub fix_type: FixType,
    /// Substitution template, if the rule can be fixed.
    pub fix: Option<Template>,
    /// Lines per scan window; `0` scans the whole document at once.
    pub max_lines: usize,
}

impl Rule {
    /// Whether this rule applies to documents of `language`.
    pub fn applies_to(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// The rewriting view of this rule, if it has a fix.
    pub fn fix(&self) -> Option<Fix<'_>> {
        self.fix.as_ref().map(|template| Fix {
            group: &self.name,
            languages: &self.languages,
            regex: &self.regex,
            template,
            fix_type: self.fix_type,
        })
    }
}

/// The part of a [`Rule`] used for rewriting text.
#[derive(Debug, Clone, Copy)]
pub struct Fix<'r> {
    pub group: &'r str,
    pub languages: &'r [String],
    pub regex: &'r Regex,
    pub template: &'r Template,
    pub fix_type: FixType,
}

impl Fix<'_> {
    /// Sort token of `text`: every match of the pattern in `text` replaced
    /// by its expanded template.
    pub fn sort_token(&self, text: &str) -> String {
        self.apply(text).into_owned()
    }

    /// Replace every match in `text` once.
    pub fn apply<'t>(&self, text: &'t str) -> std::borrow::Cow<'t, str> {
        self.regex
            .replace_all(text, |caps: &regex::Captures<'_>| self.template.expand(caps))
    }
}
