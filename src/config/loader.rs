//! Configuration file discovery and loading.
//!
//! This module finds the project configuration and its optional local
//! overlay, and merges them into a [`RelintConfig`].

use crate::config::merger::merge_configs;
use crate::config::schema::RelintConfig;
use crate::error::{RelintError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Project config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".relint.yml", ".relint.yaml", ".relint/config.yml"];

/// Local overlay, merged on top of the project config.
pub const LOCAL_CONFIG_FILE: &str = ".relint/config.local.yml";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.relint.yml`, `.relint.yaml` or `.relint/config.yml`)
/// 2. Local overrides (`.relint/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config.
    pub project: Option<PathBuf>,

    /// Local overrides: .relint/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: Self::find_project_config(project_root),
            project_local: Self::find_project_local(project_root),
        }
    }

    fn find_project_config(project_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file())
    }

    fn find_project_local(project_root: &Path) -> Option<PathBuf> {
        let path = project_root.join(LOCAL_CONFIG_FILE);
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(&self.project_local).collect()
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. A relint config file (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if ConfigPaths::find_project_config(&current).is_some() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into [`RelintConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RelintConfig> {
    let value = load_config_value(path)?;
    parse_value(value, path)
}

/// Parse YAML content into [`RelintConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<RelintConfig> {
    serde_yaml::from_str(content).map_err(|e| RelintError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RelintError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RelintError::Io(e)
        }
    })?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| RelintError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // An empty file is an empty config
    Ok(if value.is_null() {
        serde_yaml::Value::Mapping(Default::default())
    } else {
        value
    })
}

fn parse_value(value: serde_yaml::Value, path: &Path) -> Result<RelintConfig> {
    serde_yaml::from_value(value).map_err(|e| RelintError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project config and its local overlay.
///
/// # Errors
///
/// Returns `ConfigNotFound` if no project config exists.
/// Returns `ConfigParseError` if any config file is invalid.
pub fn load_merged_config(project_root: &Path) -> Result<RelintConfig> {
    let paths = ConfigPaths::discover(project_root);
    let Some(project) = paths.project.as_deref() else {
        return Err(RelintError::ConfigNotFound {
            path: project_root.join(CONFIG_FILE_NAMES[0]),
        });
    };

    let configs = paths
        .all_existing()
        .into_iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Loaded {} config file(s) from {}", configs.len(), project_root.display());
    parse_value(merge_configs(&configs), project)
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<RelintConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}
