//! Rule compilation.
//!
//! [`RuleCompiler`] turns raw rule entries into a [`RuleSet`]. Each entry is
//! validated and compiled on its own: an entry that fails is dropped with a
//! recorded reason and the rest of the batch stays usable.

use serde::{Deserialize, Serialize};

use super::registry::RuleSet;
use super::rule::{Flags, FixType, Rule, RuleId, Severity, DEFAULT_FLAGS};
use super::template::Template;
use crate::error::{RelintError, Result};

/// Language used when neither the rule nor the configuration names one.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// One language or a list of languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Languages {
    One(String),
    Many(Vec<String>),
}

impl Languages {
    fn into_vec(self) -> Vec<String> {
        match self {
            Languages::One(language) => vec![language],
            Languages::Many(languages) => languages,
        }
    }
}

/// A rule entry as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Explicit identifier; defaults to the pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Regular expression source.
    pub pattern: String,

    /// Flag characters; replaces the global flags when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,

    /// Language identifier(s) the rule applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Languages>,

    /// Message reported for violations.
    pub message: String,

    /// Group name.
    #[serde(alias = "group")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    #[serde(default, alias = "fix_type", skip_serializing_if = "Option::is_none")]
    pub fix_type: Option<FixType>,

    /// Substitution template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,

    /// Lines per scan window; `0` means the whole document.
    #[serde(default, alias = "max_lines", skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<usize>,
}

impl RuleConfig {
    /// Minimal replace rule, mostly useful in tests and embedding hosts.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the fix template.
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Set the fix type.
    pub fn with_fix_type(mut self, fix_type: FixType) -> Self {
        self.fix_type = Some(fix_type);
        self
    }

    /// Set the scan window size.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(Languages::One(language.into()));
        self
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Label used when reporting this entry.
    fn label(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.pattern.clone())
    }
}

/// Defaults applied to every entry in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefaults {
    pub language: String,
    pub flags: String,
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            flags: DEFAULT_FLAGS.to_string(),
        }
    }
}

/// An entry that did not make it into the rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedRule {
    /// Position of the entry in the configured list.
    pub index: usize,
    /// Rule id, pattern, or a positional label when neither is readable.
    pub rule: String,
    /// Why the entry was rejected.
    pub reason: String,
}

/// Result of compiling a batch.
#[derive(Debug, Default)]
pub struct Compiled {
    pub rules: RuleSet,
    pub dropped: Vec<DroppedRule>,
}

/// Compiles rule entries into executable rules.
#[derive(Debug, Clone, Default)]
pub struct RuleCompiler {
    defaults: RuleDefaults,
}

impl RuleCompiler {
    /// Create a compiler with the given global defaults.
    pub fn new(defaults: RuleDefaults) -> Self {
        Self { defaults }
    }

    /// Compile untyped entries, as read from a configuration file.
    ///
    /// Entries that do not deserialize (missing fields, unknown severity or
    /// fix type, negative `maxLines`) are dropped like any other invalid
    /// entry.
    pub fn compile_values(&self, entries: &[serde_yaml::Value]) -> Compiled {
        let mut rules = Vec::new();
        let mut dropped = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let result = serde_yaml::from_value::<RuleConfig>(entry.clone())
                .map_err(|e| (entry_label(entry, index), e.to_string()))
                .and_then(|config| {
                    self.compile_rule(&config)
                        .map_err(|e| (config.label(), e.to_string()))
                });
            match result {
                Ok(rule) => rules.push(rule),
                Err((rule, reason)) => dropped.push(self.drop_entry(index, rule, reason)),
            }
        }

        Compiled {
            rules: RuleSet::new(rules),
            dropped,
        }
    }

    /// Compile typed entries.
    pub fn compile(&self, entries: &[RuleConfig]) -> Compiled {
        let mut rules = Vec::new();
        let mut dropped = Vec::new();

        for (index, config) in entries.iter().enumerate() {
            match self.compile_rule(config) {
                Ok(rule) => rules.push(rule),
                Err(e) => dropped.push(self.drop_entry(index, config.label(), e.to_string())),
            }
        }

        Compiled {
            rules: RuleSet::new(rules),
            dropped,
        }
    }

    /// Validate and compile a single entry.
    pub fn compile_rule(&self, config: &RuleConfig) -> Result<Rule> {
        let invalid = |message: &str| RelintError::InvalidRule {
            rule: config.label(),
            message: message.to_string(),
        };

        if config.pattern.is_empty() {
            return Err(invalid("pattern must not be empty"));
        }
        if config.message.is_empty() {
            return Err(invalid("message must not be empty"));
        }
        if config.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }

        let flags = Flags::parse(config.flags.as_deref().unwrap_or(&self.defaults.flags));
        let regex = flags
            .build(&config.pattern)
            .map_err(|e| invalid(&e.to_string()))?;

        let fix_type = config.fix_type.unwrap_or_default();
        let fix = match (&config.fix, fix_type.is_reorder()) {
            (Some(source), _) => Some(Template::parse(source, regex.captures_len())),
            (None, true) => Some(Template::identity()),
            (None, false) => None,
        };
        let max_lines = config
            .max_lines
            .unwrap_or(if fix_type.is_reorder() { 0 } else { 1 });

        let mut languages: Vec<String> = config
            .language
            .clone()
            .map(Languages::into_vec)
            .unwrap_or_default()
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect();
        if languages.is_empty() {
            languages.push(self.defaults.language.clone());
        }

        Ok(Rule {
            id: RuleId::new(config.id.clone().unwrap_or_else(|| config.pattern.clone())),
            languages,
            name: config.name.clone(),
            pattern: config.pattern.clone(),
            flags,
            regex,
            message: config.message.clone(),
            severity: config.severity.unwrap_or_default(),
            fix_type,
            fix,
            max_lines,
        })
    }

    fn drop_entry(&self, index: usize, rule: String, reason: String) -> DroppedRule {
        tracing::warn!("Dropping rule #{} ({}): {}", index, rule, reason);
        DroppedRule {
            index,
            rule,
            reason,
        }
    }
}

/// Best-effort label for an entry that failed to deserialize.
fn entry_label(entry: &serde_yaml::Value, index: usize) -> String {
    ["id", "pattern"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("<entry {}>", index))
}
