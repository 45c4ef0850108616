//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`relint check`, `relint rules`)
//! - Shared configuration loading
//! - Consistent global flag handling

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod rules;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::config::{load_config, RelintConfig};
use crate::error::{RelintError, Result};
use crate::lint::RuleStore;
use crate::ui::UserInterface;

/// Configuration and compiled rules for a command.
pub(crate) struct LoadedRules {
    pub config: RelintConfig,
    pub store: RuleStore,
}

/// Load configuration and compile its rules.
///
/// Configuration problems are reported through `ui` and turned into the
/// exit code the command should return: 2 when no configuration exists,
/// 1 when it cannot be parsed.
pub(crate) fn load_rules(
    project_root: &Path,
    config_override: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<std::result::Result<LoadedRules, CommandResult>> {
    let config = match load_config(project_root, config_override) {
        Ok(config) => config,
        Err(RelintError::ConfigNotFound { path }) => {
            ui.error(&format!(
                "No configuration found at {}. Create .relint.yml first.",
                path.display()
            ));
            return Ok(Err(CommandResult::failure(2)));
        }
        Err(RelintError::ConfigParseError { path, message }) => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            return Ok(Err(CommandResult::failure(1)));
        }
        Err(e) => return Err(e),
    };

    let store = RuleStore::new();
    store.reload(&config.rules, config.defaults());
    Ok(Ok(LoadedRules { config, store }))
}
