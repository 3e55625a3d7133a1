//! The wizard prompt loop.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{EcaError, Result};
use crate::export::{export_record, ExportFormat, Projector};
use crate::record::ChangeRecord;
use crate::steps::{build_form, StepForm};
use crate::ui::{Prompt, PromptOption, StepBanner, UserInterface};
use crate::workflow::{StepId, WizardSession};

/// Export attempts allowed on the review step before the run gives up.
pub const MAX_EXPORT_ATTEMPTS: u32 = 20;

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The record was exported to this path.
    Exported(PathBuf),
    /// The user quit before exporting.
    Abandoned,
    /// Exporting failed and could not be retried.
    ExportFailed,
}

/// Options for a wizard run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Export format used on the review step.
    pub format: ExportFormat,
    /// Directory exports are written into.
    pub output_dir: PathBuf,
    /// Date stamped into the export name.
    pub date: NaiveDate,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            output_dir: PathBuf::from("."),
            date: chrono::Local::now().date_naive(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Continue,
    Edit,
    Back,
    Export,
    Quit,
}

impl Navigation {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Edit => "edit",
            Self::Back => "back",
            Self::Export => "export",
            Self::Quit => "quit",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Continue => "Continue",
            Self::Edit => "Fix answers",
            Self::Back => "Back",
            Self::Export => "Export",
            Self::Quit => "Quit without exporting",
        }
    }

    fn option(self) -> PromptOption {
        PromptOption::new(self.as_str(), self.label())
    }

    fn parse(raw: &str) -> Option<Self> {
        [
            Self::Continue,
            Self::Edit,
            Self::Back,
            Self::Export,
            Self::Quit,
        ]
            .into_iter()
            .find(|n| n.as_str() == raw.trim())
    }
}

/// Drives a [`WizardSession`] through its steps with a [`UserInterface`].
pub struct WizardRunner<'a> {
    catalog: &'a Catalog,
    projector: &'a Projector,
    options: RunOptions,
    session: WizardSession,
}

impl<'a> WizardRunner<'a> {
    /// Create a runner over an empty record.
    pub fn new(catalog: &'a Catalog, projector: &'a Projector, options: RunOptions) -> Self {
        Self {
            catalog,
            projector,
            options,
            session: WizardSession::new(),
        }
    }

    /// Start from an existing record instead of an empty one.
    pub fn with_record(mut self, record: ChangeRecord) -> Self {
        self.session = WizardSession::from_record(record);
        self
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Run the wizard until the record is exported or abandoned.
    pub fn run(&mut self, ui: &mut dyn UserInterface) -> Result<WizardOutcome> {
        let mut export_attempts = 0;

        loop {
            let step = self.session.current();
            let (position, total) = self.session.position();
            ui.show_step(&StepBanner::new(step.title(), position, total));

            let mut form = build_form(step, self.session.record(), self.catalog);
            match self.complete_form(form.as_mut(), ui)? {
                Some(Navigation::Back) => {
                    self.session.go_back();
                    continue;
                }
                Some(Navigation::Quit) => return Ok(self.abandon()),
                _ => {}
            }
            self.session.apply(form.to_update());

            if step == StepId::Search {
                self.warn_missing_manufacturing_branch(ui);
            }

            if step == StepId::Review {
                match self.ask_navigation(ui, "wizard.review", Navigation::Export)? {
                    Navigation::Export => {
                        export_attempts += 1;
                        match self.export(ui) {
                            Ok(path) => return Ok(WizardOutcome::Exported(path)),
                            Err(e) => {
                                ui.error(&e.to_string());
                                if !ui.is_interactive() || export_attempts >= MAX_EXPORT_ATTEMPTS {
                                    return Ok(WizardOutcome::ExportFailed);
                                }
                            }
                        }
                    }
                    Navigation::Back => {
                        self.session.go_back();
                    }
                    Navigation::Quit => return Ok(self.abandon()),
                    Navigation::Continue | Navigation::Edit => {}
                }
                continue;
            }

            match self.ask_navigation(ui, "wizard.navigation", Navigation::Continue)? {
                Navigation::Back => {
                    self.session.go_back();
                }
                Navigation::Quit => return Ok(self.abandon()),
                _ => {
                    self.session.advance();
                }
            }
        }
    }

    /// Collect a form until it is valid or the user leaves it.
    ///
    /// While answers are missing only fixing them, going back or quitting
    /// is offered; leaving discards the form's answers. Non-interactive runs
    /// can't fix answers, so an incomplete form fails the run.
    fn complete_form(
        &self,
        form: &mut dyn StepForm,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<Navigation>> {
        let step = form.id();

        loop {
            form.collect(ui)?;
            let problems = form.problems();
            if problems.is_empty() {
                return Ok(None);
            }

            debug!(step = %step, problems = ?problems, "Step incomplete");
            if !ui.is_interactive() {
                return Err(EcaError::StepIncomplete {
                    step: step.to_string(),
                    problems,
                });
            }
            for problem in &problems {
                ui.warning(problem);
            }

            match self.ask_navigation(ui, "wizard.incomplete", Navigation::Edit)? {
                Navigation::Back if !self.session.is_first() => return Ok(Some(Navigation::Back)),
                Navigation::Quit => return Ok(Some(Navigation::Quit)),
                _ => {}
            }
        }
    }

    fn ask_navigation(
        &self,
        ui: &mut dyn UserInterface,
        key: &str,
        primary: Navigation,
    ) -> Result<Navigation> {
        let mut options = vec![primary.option()];
        if !self.session.is_first() {
            options.push(Navigation::Back.option());
        }
        options.push(Navigation::Quit.option());

        let answer = ui.prompt(&Prompt::select(
            key,
            "What next?",
            options,
            Some(primary.as_str()),
        ))?;
        Ok(Navigation::parse(&answer.as_string()).unwrap_or(primary))
    }

    fn export(&self, ui: &mut dyn UserInterface) -> Result<PathBuf> {
        let writer = self.options.format.writer();
        let mut spinner = ui.start_spinner(&format!(
            "Writing {} export...",
            self.options.format.as_str()
        ));

        match export_record(
            self.session.record(),
            self.projector,
            writer.as_ref(),
            &self.options.output_dir,
            self.options.date,
        ) {
            Ok(path) => {
                spinner.finish_success(&format!("Export written to {}", path.display()));
                info!(path = %path.display(), "Wizard exported record");
                Ok(path)
            }
            Err(e) => {
                spinner.finish_error("Export failed");
                Err(e)
            }
        }
    }

    fn warn_missing_manufacturing_branch(&self, ui: &mut dyn UserInterface) {
        if self.session.record().lacks_manufacturing_branch() {
            ui.warning("No EM or SD datasets selected: no manufacturing assessment will be asked");
        }
    }

    fn abandon(&self) -> WizardOutcome {
        info!(step = %self.session.current(), "Wizard abandoned");
        WizardOutcome::Abandoned
    }
}
