//! Configuration schema definitions for relint.
//!
//! This module contains the struct that maps to the `.relint.yml` file
//! format. Rule entries stay untyped here; the rule compiler deserializes
//! them one at a time so a single bad entry cannot reject the whole file.

use serde::{Deserialize, Serialize};

use crate::lint::{RuleDefaults, DEFAULT_LANGUAGE};
use crate::lint::rule::DEFAULT_FLAGS;

/// Root configuration structure for `.relint.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelintConfig {
    /// Default language for rules that do not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Default regex flags for rules that do not set their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,

    /// Rule entries, in evaluation order.
    pub rules: Vec<serde_yaml::Value>,
}

impl RelintConfig {
    /// Global defaults for the rule compiler.
    pub fn defaults(&self) -> RuleDefaults {
        RuleDefaults {
            language: self
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            flags: self
                .flags
                .clone()
                .unwrap_or_else(|| DEFAULT_FLAGS.to_string()),
        }
    }

    /// Language used for documents when none is requested.
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}
