//! Configuration schema types.
//!
//! Everything here is optional in the YAML; missing keys fall back to the
//! `Default` implementations.
//!
//! ```yaml
//! settings:
//!   default_output: normal
//!   export_format: json
//!   output_dir: exports
//! no_reason_options:
//!   - Not applicable to this change
//!   - Covered by existing documentation
//! reference_documents:
//!   - D-0000916903 ECA Requirements
//! ```

use crate::export::ExportFormat;
use crate::ui::OutputMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, the merged result of `.eca/config.yml` and
/// `.eca/config.local.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcaConfig {
    pub settings: Settings,

    /// Replaces the catalog's "reason for No" choices when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub no_reason_options: Vec<String>,

    /// Replaces the documents listed on the Instructions sheet when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_documents: Vec<String>,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output verbosity when neither `--verbose` nor `--quiet` is given.
    pub default_output: OutputMode,

    pub export_format: ExportFormat,

    /// Export directory. Relative paths resolve against the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl EcaConfig {
    /// Export directory for a project, falling back to the project root.
    pub fn output_dir(&self, project_root: &std::path::Path) -> PathBuf {
        match &self.settings.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_root.join(dir),
            None => project_root.to_path_buf(),
        }
    }
}
