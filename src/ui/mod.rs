//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for scripted and headless runs
//! - [`MockUI`] for tests
//! - [`StepBanner`], spinners, theme and tables
//!
//! # Example
//!
//! ```
//! use eca_wizard::ui::{create_ui, OutputMode, StepBanner};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_step(&StepBanner::new("Scope of Change", 2, 6));
//! ui.success("Export written");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::EcaTheme;

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Announce the step the wizard is on.
    fn show_step(&mut self, step: &StepBanner);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// The step being shown and where it sits in the current step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBanner {
    pub title: String,
    /// 1-based.
    pub position: usize,
    pub total: usize,
}

impl StepBanner {
    pub fn new(title: impl Into<String>, position: usize, total: usize) -> Self {
        Self {
            title: title.into(),
            position,
            total,
        }
    }

    /// `Step 3 of 7`.
    pub fn counter(&self) -> String {
        format!("Step {} of {}", self.position, self.total)
    }

    /// `3/7`.
    pub fn short(&self) -> String {
        format!("{}/{}", self.position, self.total)
    }
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for scripted answers).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// A yes/no question.
    pub fn confirm(key: impl Into<String>, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }

    /// A free-text question. An empty default is still a default.
    pub fn input(key: impl Into<String>, question: impl Into<String>, default: &str) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Input,
            default: Some(default.to_string()),
        }
    }

    /// Pick one option.
    pub fn select(
        key: impl Into<String>,
        question: impl Into<String>,
        options: Vec<PromptOption>,
        default: Option<&str>,
    ) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::Select { options },
            default: default.map(str::to_string),
        }
    }

    /// Pick any number of options. `defaults` are option values.
    pub fn multi_select(
        key: impl Into<String>,
        question: impl Into<String>,
        options: Vec<PromptOption>,
        defaults: &[&str],
    ) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            prompt_type: PromptType::MultiSelect { options },
            default: Some(defaults.join(",")),
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Select one from a list of options.
    Select { options: Vec<PromptOption> },
    /// Select multiple from a list of options.
    MultiSelect { options: Vec<PromptOption> },
}

/// An option in a select prompt.
#[derive(Debug, Clone)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

impl PromptOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input or select.
    String(String),
    /// Multiple string results from multi-select.
    Strings(Vec<String>),
}

impl PromptResult {
    /// Interpret a scripted answer according to the prompt type.
    ///
    /// Confirms accept `true`/`yes`/`y`/`1`; multi-selects split on commas.
    pub fn from_raw(prompt_type: &PromptType, raw: &str) -> Self {
        match prompt_type {
            PromptType::Confirm => Self::Bool(matches!(
                raw.trim().to_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            )),
            PromptType::MultiSelect { .. } => Self::Strings(
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
            _ => Self::String(raw.to_string()),
        }
    }

    /// Get as string.
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
            Self::Strings(v) => v.join(","),
        }
    }

    /// Get as bool. Strings parse the way confirm answers do.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            other => matches!(
                other.as_string().trim().to_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            ),
        }
    }

    /// Get as a list of selected values.
    pub fn as_strings(&self) -> Vec<String> {
        match self {
            Self::Strings(v) => v.clone(),
            Self::String(s) if s.is_empty() => Vec::new(),
            Self::String(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
            Self::Bool(b) => vec![b.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_string() {
        assert_eq!(PromptResult::Bool(true).as_string(), "true");
        assert_eq!(PromptResult::String("hello".into()).as_string(), "hello");
        assert_eq!(
            PromptResult::Strings(vec!["a".into(), "b".into()]).as_string(),
            "a,b"
        );
    }

    #[test]
    fn prompt_result_as_bool() {
        assert!(PromptResult::Bool(true).as_bool());
        assert!(PromptResult::String("yes".into()).as_bool());
        assert!(!PromptResult::String("no".into()).as_bool());
    }

    #[test]
    fn prompt_result_as_strings() {
        assert!(PromptResult::String(String::new()).as_strings().is_empty());
        assert_eq!(
            PromptResult::String("a, b".into()).as_strings(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn from_raw_follows_prompt_type() {
        assert_eq!(
            PromptResult::from_raw(&PromptType::Confirm, "Y"),
            PromptResult::Bool(true)
        );
        assert_eq!(
            PromptResult::from_raw(&PromptType::MultiSelect { options: vec![] }, "qsr, ,em"),
            PromptResult::Strings(vec!["qsr".into(), "em".into()])
        );
        assert_eq!(
            PromptResult::from_raw(&PromptType::MultiSelect { options: vec![] }, ""),
            PromptResult::Strings(vec![])
        );
        assert_eq!(
            PromptResult::from_raw(&PromptType::Input, " text "),
            PromptResult::String(" text ".into())
        );
    }

    #[test]
    fn step_banner_positions() {
        let step = StepBanner::new("CRB / CIB", 4, 9);
        assert_eq!(step.counter(), "Step 4 of 9");
        assert_eq!(step.short(), "4/9");
    }

    #[test]
    fn prompt_constructors() {
        let confirm = Prompt::confirm("go", "Continue?", true);
        assert!(matches!(confirm.prompt_type, PromptType::Confirm));
        assert_eq!(confirm.default.as_deref(), Some("true"));

        let multi = Prompt::multi_select(
            "flags",
            "Pick",
            vec![PromptOption::new("a", "A"), PromptOption::new("b", "B")],
            &["a", "b"],
        );
        assert_eq!(multi.default.as_deref(), Some("a,b"));

        let select = Prompt::select("one", "Pick one", vec![], None);
        assert!(select.default.is_none());
    }
}
