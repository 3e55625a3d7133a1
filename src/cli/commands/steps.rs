//! Steps command implementation.
//!
//! `eca steps --record <file>` prints the step sequence a record would walk
//! through, without prompting.

use crate::cli::args::StepsArgs;
use crate::error::{EcaError, Result};
use crate::ui::UserInterface;
use crate::workflow::compute_steps;

use super::dispatcher::{read_record, Command, CommandResult, EXIT_MISSING_INPUT};
use super::display::{step_table, steps_json};

/// The steps command implementation.
pub struct StepsCommand {
    args: StepsArgs,
}

impl StepsCommand {
    /// Create a new steps command.
    pub fn new(args: StepsArgs) -> Self {
        Self { args }
    }
}

impl Command for StepsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(record) = read_record(ui, &self.args.record)? else {
            return Ok(CommandResult::failure(EXIT_MISSING_INPUT));
        };

        let steps = compute_steps(&record);
        tracing::debug!(count = steps.len(), "Computed step sequence");

        if self.args.json {
            let json = serde_json::to_string_pretty(&steps_json(&steps))
                .map_err(|e| EcaError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&step_table(&steps).render());
        if record.lacks_manufacturing_branch() {
            ui.warning("No EM or SD datasets selected: no manufacturing assessment step");
        }
        Ok(CommandResult::success())
    }
}
