//! Configuration loading and parsing for relint.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use relint::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(".relint.yml"),
//!     "rules:\n  - name: todo\n    pattern: TODO\n    message: resolve\n",
//! )
//! .unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.rules.len(), 1);
//! assert_eq!(config.language(), "plaintext");
//! ```
//!
//! # Configuration File Locations
//!
//! relint discovers and merges configuration in this order:
//! 1. Project config (`.relint.yml`, `.relint.yaml` or `.relint/config.yml`)
//! 2. Local overrides (`.relint/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;

pub use schema::RelintConfig;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, ConfigPaths, CONFIG_FILE_NAMES, LOCAL_CONFIG_FILE,
};

pub use merger::{deep_merge, merge_configs, merge_layer};
