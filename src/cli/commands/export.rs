//! Export command implementation.
//!
//! `eca export --record <file>` projects a saved change record and writes
//! it without prompting.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::args::ExportArgs;
use crate::config::{validate, EcaConfig};
use crate::error::Result;
use crate::export::{export_record, Projector};
use crate::ui::UserInterface;

use super::dispatcher::{
    read_record, resolve_format, Command, CommandResult, EXIT_ERROR, EXIT_MISSING_INPUT,
};

/// The export command implementation.
pub struct ExportCommand {
    project_root: PathBuf,
    config: EcaConfig,
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(project_root: &Path, config: EcaConfig, args: ExportArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn date(&self) -> std::result::Result<NaiveDate, String> {
        match &self.args.date {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| format!("Invalid date '{}': {} (expected YYYY-MM-DD)", raw, e)),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        validate(&self.config)?;
        let format = resolve_format(
            self.args.format.as_deref(),
            self.config.settings.export_format,
        )?;
        let date = match self.date() {
            Ok(date) => date,
            Err(message) => {
                ui.error(&message);
                return Ok(CommandResult::failure(EXIT_ERROR));
            }
        };

        let Some(record) = read_record(ui, &self.args.record)? else {
            return Ok(CommandResult::failure(EXIT_MISSING_INPUT));
        };
        if record.lacks_manufacturing_branch() {
            ui.warning("No EM or SD datasets selected: the export has no manufacturing sheet");
        }

        let dir = match &self.args.output_dir {
            Some(dir) => dir.clone(),
            None => self.config.output_dir(&self.project_root),
        };
        let projector = Projector::new(self.config.reference_documents.clone());
        let writer = format.writer();

        let mut spinner = ui.start_spinner(&format!("Writing {} export...", format));
        match export_record(&record, &projector, writer.as_ref(), &dir, date) {
            Ok(path) => {
                spinner.finish_success(&format!("Export written to {}", path.display()));
                ui.success(&format!("Assessment exported to {}", path.display()));
                Ok(CommandResult::success())
            }
            Err(e) => {
                spinner.finish_error("Export failed");
                ui.error(&e.to_string());
                Ok(CommandResult::failure(EXIT_ERROR))
            }
        }
    }
}
