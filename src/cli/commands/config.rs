//! Config command implementation.
//!
//! `eca config` shows the resolved configuration and any problems with it.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{validate_config, ConfigPaths, EcaConfig};
use crate::error::{EcaError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_ERROR};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config: EcaConfig,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config: EcaConfig, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let paths = ConfigPaths::discover(&self.project_root);
        let existing = paths.all_existing();

        if self.args.json {
            let json = serde_json::to_string_pretty(&self.config)
                .map_err(|e| EcaError::Other(e.into()))?;
            ui.message(&json);
        } else {
            if existing.is_empty() {
                ui.message("# No configuration found, showing defaults");
            }
            for path in &existing {
                ui.message(&format!("# {}", path.display()));
            }
            let yaml =
                serde_yaml::to_string(&self.config).map_err(|e| EcaError::Other(e.into()))?;
            ui.message(&yaml);
        }

        let problems = validate_config(&self.config);
        if problems.is_empty() {
            return Ok(CommandResult::success());
        }
        for problem in &problems {
            ui.warning(&format!("{} ({})", problem.message, problem.rule));
        }
        Ok(CommandResult::failure(EXIT_ERROR))
    }
}
