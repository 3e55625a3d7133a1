//! Configuration file discovery and loading.
//!
//! A project needs no configuration at all: when neither file exists the
//! defaults apply.

use crate::config::merger::merge_configs;
use crate::config::schema::EcaConfig;
use crate::error::{EcaError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory holding the project's configuration files.
pub const CONFIG_DIR: &str = ".eca";

/// Paths to configuration files in priority order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .eca/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .eca/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(&self.project_local).collect()
    }

    pub fn has_any(&self) -> bool {
        self.project.is_some() || self.project_local.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for an `.eca` directory first, then a `.git` directory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a config file as raw YAML Value (for merging).
///
/// An empty file counts as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EcaError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EcaError::Io(e)
        }
    })?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| EcaError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if value.is_null() {
        Ok(serde_yaml::Value::Mapping(Default::default()))
    } else {
        Ok(value)
    }
}

/// Parse YAML content into an [`EcaConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<EcaConfig> {
    if content.trim().is_empty() {
        return Ok(EcaConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| EcaError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project config and its local overrides.
///
/// # Errors
///
/// Returns `ConfigParseError` if either file is invalid YAML or does not
/// match the schema. Missing files are skipped.
pub fn load_config(project_root: &Path) -> Result<EcaConfig> {
    let paths = ConfigPaths::discover(project_root);

    if !paths.has_any() {
        debug!(root = %project_root.display(), "No configuration found, using defaults");
        return Ok(EcaConfig::default());
    }

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        debug!(path = %path.display(), "Loading configuration");
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| EcaError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use crate::ui::OutputMode;
    use tempfile::TempDir;

    fn project(config: Option<&str>, local: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        if let Some(content) = config {
            fs::write(dir.join("config.yml"), content).unwrap();
        }
        if let Some(content) = local {
            fs::write(dir.join("config.local.yml"), content).unwrap();
        }
        temp
    }

    #[test]
    fn discover_finds_both_files_in_merge_order() {
        let temp = project(Some(""), Some(""));
        let paths = ConfigPaths::discover(temp.path());
        let all = paths.all_existing();

        assert_eq!(all.len(), 2);
        assert!(all[0].ends_with("config.yml"));
        assert!(all[1].ends_with("config.local.yml"));
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
        assert!(!paths.has_any());
    }

    #[test]
    fn find_project_root_finds_eca_dir() {
        let temp = project(None, None);
        let subdir = temp.path().join("drafts").join("2024");
        fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_falls_back_to_git_dir() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("records");
        fs::create_dir_all(&subdir).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();

        assert_eq!(find_project_root(&subdir), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_prefers_nearest_marker() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested").join("project");
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::create_dir_all(nested.join(CONFIG_DIR)).unwrap();

        assert_eq!(find_project_root(&nested), Some(nested));
    }

    #[test]
    fn missing_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_config(temp.path()).unwrap(), EcaConfig::default());
    }

    #[test]
    fn empty_config_file_gives_defaults() {
        let temp = project(Some(""), None);
        assert_eq!(load_config(temp.path()).unwrap(), EcaConfig::default());
    }

    #[test]
    fn local_overrides_project_config() {
        let temp = project(
            Some("settings:\n  default_output: verbose\n  export_format: json\nreference_documents:\n  - D-1\n"),
            Some("settings:\n  default_output: quiet\n"),
        );

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.settings.default_output, OutputMode::Quiet);
        assert_eq!(config.settings.export_format, ExportFormat::Json);
        assert_eq!(config.reference_documents, vec!["D-1"]);
    }

    #[test]
    fn local_only_config_is_loaded() {
        let temp = project(None, Some("settings:\n  export_format: yaml\n"));
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.settings.export_format, ExportFormat::Yaml);
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = project(Some("settings: [unclosed"), None);
        let result = load_config(temp.path());
        assert!(matches!(result, Err(EcaError::ConfigParseError { .. })));
    }

    #[test]
    fn schema_mismatch_is_a_parse_error() {
        let temp = project(Some("settings:\n  export_format: xlsx\n"), None);
        let err = load_config(temp.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse merged config"));
    }

    #[test]
    fn load_config_value_reports_missing_file() {
        let result = load_config_value(Path::new("/nonexistent/config.yml"));
        assert!(matches!(result, Err(EcaError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_handles_empty_content() {
        let config = parse_config("  \n", Path::new("config.yml")).unwrap();
        assert_eq!(config, EcaConfig::default());
    }
}
