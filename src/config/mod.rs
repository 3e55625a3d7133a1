//! Project configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use eca_wizard::config::{load_config, validate};
//! use eca_wizard::export::ExportFormat;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let eca_dir = temp.path().join(".eca");
//! fs::create_dir_all(&eca_dir).unwrap();
//! fs::write(eca_dir.join("config.yml"), "settings:\n  export_format: json\n").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.settings.export_format, ExportFormat::Json);
//! ```
//!
//! # Configuration File Locations
//!
//! Merged in this order, later files winning:
//! 1. Project config (`.eca/config.yml`)
//! 2. Local overrides (`.eca/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_value, parse_config, ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{EcaConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
