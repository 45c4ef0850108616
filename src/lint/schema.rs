//! JSON Schema generation for relint configuration.
//!
//! This module generates a JSON Schema (Draft-07) for `.relint.yml`,
//! enabling IDE autocomplete and validation of rule entries.

use serde_json::{json, Value};

use super::compiler::DEFAULT_LANGUAGE;
use super::rule::DEFAULT_FLAGS;

/// Generates JSON Schema for relint configuration.
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete JSON Schema for `.relint.yml`.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "https://relint.dev/schemas/config.json",
            "title": "relint Configuration",
            "description": "Regex lint rules with optional automatic fixes",
            "type": "object",
            "properties": {
                "language": {
                    "type": "string",
                    "default": DEFAULT_LANGUAGE,
                    "description": "Language for rules that do not name one"
                },
                "flags": self.flags_schema(),
                "rules": {
                    "type": "array",
                    "description": "Rule definitions, in evaluation order",
                    "items": self.rule_schema()
                }
            },
            "additionalProperties": false
        })
    }

    fn flags_schema(&self) -> Value {
        json!({
            "type": "string",
            "pattern": "^[a-z]*$",
            "default": DEFAULT_FLAGS,
            "description": "Regex flags; supported characters are g, i, m, s, u and x"
        })
    }

    /// Generate schema for one rule entry.
    fn rule_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Stable identifier (defaults to the pattern)"
                },
                "name": {
                    "type": "string",
                    "description": "Group name; rules of a group merge and fix together"
                },
                "pattern": {
                    "type": "string",
                    "description": "Regular expression to search for"
                },
                "flags": self.flags_schema(),
                "language": {
                    "oneOf": [
                        { "type": "string" },
                        { "type": "array", "items": { "type": "string" } }
                    ],
                    "description": "Language identifier(s) this rule applies to"
                },
                "message": {
                    "type": "string",
                    "description": "Message reported for each violation"
                },
                "severity": {
                    "type": "string",
                    "enum": ["Error", "Warning", "Information", "Hint"],
                    "default": "Warning",
                    "description": "Severity of violations"
                },
                "fixType": {
                    "type": "string",
                    "enum": ["replace", "reorder_asc", "reorder_desc"],
                    "default": "replace",
                    "description": "Rewrite matches, or sort them"
                },
                "fix": {
                    "type": "string",
                    "description": "Substitution template; $1, ${name} and $& refer to the match"
                },
                "maxLines": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Lines per scan window; 0 scans the whole document"
                }
            },
            "required": ["name", "pattern", "message"],
            "additionalProperties": false
        })
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}
