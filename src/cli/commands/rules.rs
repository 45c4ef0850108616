//! Rules command implementation.
//!
//! The `relint rules` command lists the compiled rules by group, along with
//! configuration entries that were dropped.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::RulesArgs;
use crate::error::Result;
use crate::lint::{Rule, RuleSet};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_rules;

/// The rules command implementation.
pub struct RulesCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: RulesArgs,
}

impl RulesCommand {
    /// Create a new rules command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: RulesArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    fn rule_json(rule: &Rule) -> serde_json::Value {
        json!({
            "id": rule.id,
            "name": rule.name,
            "pattern": rule.pattern,
            "flags": rule.flags.to_string(),
            "languages": rule.languages,
            "message": rule.message,
            "severity": rule.severity.to_string(),
            "fixType": rule.fix_type,
            "fix": rule.fix.as_ref().map(|t| t.source()),
            "maxLines": rule.max_lines,
        })
    }

    fn describe(rule: &Rule) -> String {
        let mut line = format!(
            "  {} [{}, {}, {}]",
            rule.id,
            rule.severity,
            rule.fix_type,
            rule.languages.join(",")
        );
        if let Some(fix) = &rule.fix {
            line.push_str(&format!(" -> {}", fix.source()));
        }
        line
    }

    fn list(&self, rules: &RuleSet, ui: &mut dyn UserInterface) {
        let mut text = String::new();
        for name in rules.group_names() {
            let members: Vec<&Rule> = rules.rules().iter().filter(|r| r.name == name).collect();
            text.push_str(&format!("{} ({} rule(s))\n", name, members.len()));
            for rule in members {
                text.push_str(&Self::describe(rule));
                text.push('\n');
            }
        }
        ui.output(&text);
    }
}

impl Command for RulesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = match load_rules(&self.project_root, self.config_override.as_deref(), ui)? {
            Ok(loaded) => loaded,
            Err(result) => return Ok(result),
        };
        let (rules, dropped) = loaded.store.snapshot_with_dropped();

        if self.args.json {
            let output = json!({
                "rules": rules.rules().iter().map(Self::rule_json).collect::<Vec<_>>(),
                "dropped": dropped.as_slice(),
            });
            let text = serde_json::to_string_pretty(&output).map_err(anyhow::Error::from)?;
            ui.output(&format!("{}\n", text));
            return Ok(CommandResult::success());
        }

        if rules.is_empty() {
            ui.warning("No rules configured");
        } else {
            self.list(&rules, ui);
        }
        for entry in dropped.iter() {
            ui.warning(&format!(
                "Dropped rule #{} ({}): {}",
                entry.index, entry.rule, entry.reason
            ));
        }

        Ok(CommandResult::success())
    }
}
