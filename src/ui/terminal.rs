//! Interactive terminal UI built on `dialoguer`.
//!
//! The UI remembers the step it last announced and prefixes every prompt
//! with its position, so long forms still show where the wizard is once the
//! banner has scrolled away.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::io::Write;

use crate::error::{EcaError, Result};

use super::{
    EcaTheme, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt, PromptOption, PromptResult,
    PromptType, SpinnerHandle, StepBanner, UserInterface,
};

const MULTI_SELECT_HINT: &str = "space toggles, enter confirms";

/// Interactive terminal UI.
pub struct TerminalUI {
    term: Term,
    theme: EcaTheme,
    mode: OutputMode,
    step: Option<StepBanner>,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let term = Term::stdout();
        Self {
            theme: EcaTheme::for_term(&term),
            term,
            mode,
            step: None,
        }
    }

    fn status_line(&self, line: &str) {
        if self.mode.shows_status() {
            writeln!(&self.term, "{}", line).ok();
        }
    }

    fn dialog_theme(&self) -> ColorfulTheme {
        let prompt_prefix = match &self.step {
            Some(step) => self.theme.prompt_prefix(step),
            None => style(String::new()),
        };
        ColorfulTheme {
            prompt_prefix,
            ..ColorfulTheme::default()
        }
    }

    fn confirm(&self, prompt: &Prompt) -> Result<PromptResult> {
        let default = prompt
            .default
            .as_deref()
            .map(|d| PromptResult::from_raw(&PromptType::Confirm, d).as_bool())
            .unwrap_or(true);

        let answer = Confirm::with_theme(&self.dialog_theme())
            .with_prompt(&prompt.question)
            .default(default)
            .interact_on(&self.term)
            .map_err(dialog_error)?;
        Ok(PromptResult::Bool(answer))
    }

    /// Free text. A recorded answer is pre-filled for editing.
    fn input(&self, prompt: &Prompt) -> Result<PromptResult> {
        let theme = self.dialog_theme();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(&prompt.question)
            .allow_empty(true);
        let input = match prompt.default.as_deref().filter(|d| !d.is_empty()) {
            Some(previous) => input.with_initial_text(previous),
            None => input,
        };

        let answer = input.interact_text_on(&self.term).map_err(dialog_error)?;
        Ok(PromptResult::String(answer))
    }

    fn select(&self, prompt: &Prompt, options: &[PromptOption]) -> Result<PromptResult> {
        if options.is_empty() {
            return Ok(PromptResult::String(
                prompt.default.clone().unwrap_or_default(),
            ));
        }

        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let current = prompt
            .default
            .as_deref()
            .and_then(|d| options.iter().position(|o| o.value == d))
            .unwrap_or(0);

        let picked = Select::with_theme(&self.dialog_theme())
            .with_prompt(&prompt.question)
            .items(&labels)
            .default(current)
            .interact_on(&self.term)
            .map_err(dialog_error)?;
        Ok(PromptResult::String(options[picked].value.clone()))
    }

    fn multi_select(&self, prompt: &Prompt, options: &[PromptOption]) -> Result<PromptResult> {
        let checked: Vec<&str> = prompt
            .default
            .as_deref()
            .map(|d| d.split(',').collect())
            .unwrap_or_default();
        let defaults: Vec<bool> = options
            .iter()
            .map(|o| checked.contains(&o.value.as_str()))
            .collect();
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();

        self.term
            .write_line(&self.theme.format_hint(MULTI_SELECT_HINT))
            .ok();
        let picked = MultiSelect::with_theme(&self.dialog_theme())
            .with_prompt(&prompt.question)
            .items(&labels)
            .defaults(&defaults)
            .interact_on(&self.term)
            .map_err(dialog_error)?;

        Ok(PromptResult::Strings(
            picked.into_iter().map(|i| options[i].value.clone()).collect(),
        ))
    }
}

fn dialog_error(e: dialoguer::Error) -> EcaError {
    EcaError::Io(e.into())
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.status_line(msg);
    }

    fn success(&mut self, msg: &str) {
        self.status_line(&self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        self.status_line(&self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        writeln!(&self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        match &prompt.prompt_type {
            PromptType::Confirm => self.confirm(prompt),
            PromptType::Input => self.input(prompt),
            PromptType::Select { options } => self.select(prompt, options),
            PromptType::MultiSelect { options } => self.multi_select(prompt, options),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_step(&mut self, step: &StepBanner) {
        self.status_line(&format!("\n{}\n", self.theme.format_step(step)));
        self.step = Some(step.clone());
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Terminal UI when asked for and stdout is a TTY, scripted UI otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_carry_the_announced_step() {
        let mut ui = TerminalUI::new(OutputMode::Silent);
        assert_eq!(ui.dialog_theme().prompt_prefix.to_string(), "");

        ui.show_step(&StepBanner::new("Product ECA", 3, 7));
        assert!(ui.dialog_theme().prompt_prefix.to_string().contains("3/7"));

        ui.show_step(&StepBanner::new("Affected Items", 4, 7));
        assert!(ui.dialog_theme().prompt_prefix.to_string().contains("4/7"));
    }

    #[test]
    fn select_without_options_keeps_the_recorded_answer() {
        let ui = TerminalUI::new(OutputMode::Silent);
        let prompt = Prompt::select("track.impact", "Impact", vec![], Some("2"));
        assert_eq!(
            ui.select(&prompt, &[]).unwrap(),
            PromptResult::String("2".into())
        );
    }

    #[test]
    fn create_ui_falls_back_to_scripted_answers() {
        let ui = create_ui(false, OutputMode::Silent);
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
