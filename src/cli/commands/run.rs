//! Run command implementation.
//!
//! `eca run` (or plain `eca`) walks the assessment wizard and exports the
//! finished record.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::cli::args::RunArgs;
use crate::config::{validate, EcaConfig};
use crate::error::Result;
use crate::export::Projector;
use crate::runner::{RunOptions, WizardOutcome, WizardRunner};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{
    read_record, resolve_format, Command, CommandResult, EXIT_ABANDONED, EXIT_ERROR,
    EXIT_MISSING_INPUT,
};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config: EcaConfig,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config: EcaConfig, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn build_options(&self) -> Result<RunOptions> {
        let output_dir = match &self.args.output_dir {
            Some(dir) => dir.clone(),
            None => self.config.output_dir(&self.project_root),
        };

        let configured = self.config.settings.export_format;
        Ok(RunOptions {
            format: resolve_format(self.args.format.as_deref(), configured)?,
            output_dir,
            ..Default::default()
        })
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        validate(&self.config)?;
        let options = self.build_options()?;

        if ui.output_mode() == OutputMode::Verbose {
            ui.message(&format!(
                "Exports: {} ({})",
                options.output_dir.display(),
                options.format
            ));
        }

        let catalog =
            Catalog::load()?.with_no_reason_options(self.config.no_reason_options.clone());
        let projector = Projector::new(self.config.reference_documents.clone());
        let mut runner = WizardRunner::new(&catalog, &projector, options);

        if let Some(path) = &self.args.record {
            let Some(record) = read_record(ui, path)? else {
                return Ok(CommandResult::failure(EXIT_MISSING_INPUT));
            };
            runner = runner.with_record(record);
        }

        match runner.run(ui)? {
            WizardOutcome::Exported(path) => {
                ui.success(&format!("Assessment exported to {}", path.display()));
                Ok(CommandResult::success())
            }
            WizardOutcome::Abandoned => {
                ui.warning("Wizard closed without exporting");
                Ok(CommandResult::failure(EXIT_ABANDONED))
            }
            WizardOutcome::ExportFailed => Ok(CommandResult::failure(EXIT_ERROR)),
        }
    }
}
