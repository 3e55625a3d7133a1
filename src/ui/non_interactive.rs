//! Non-interactive UI for scripted and headless runs.

use std::collections::HashMap;

use crate::error::{EcaError, Result};

use super::{OutputMode, Prompt, PromptResult, SpinnerHandle, StepBanner, UserInterface};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "ECA_PROMPT_";

/// Environment variable that answers the prompt with this key.
///
/// `search.ecr-number` becomes `ECA_PROMPT_SEARCH_ECR_NUMBER`.
pub fn prompt_env_key(key: &str) -> String {
    let suffix: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", PROMPT_ENV_PREFIX, suffix)
}

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `ECA_PROMPT_<KEY>` variables, then from the
/// prompt's default. A prompt with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading answers from the environment.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(value) = self.env_overrides.get(&prompt_env_key(&prompt.key)) {
            return Ok(PromptResult::from_raw(&prompt.prompt_type, value));
        }

        if let Some(default) = &prompt.default {
            return Ok(PromptResult::from_raw(&prompt.prompt_type, default));
        }

        Err(EcaError::ConfigValidationError {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (set {} or provide a default)",
                prompt.key,
                prompt_env_key(&prompt.key)
            ),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_step(&mut self, step: &StepBanner) {
        if self.mode.shows_status() {
            println!("[{}] {}", step.short(), step.title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only prints its final line.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        println!("  ✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{PromptOption, PromptType};

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_key_normalizes_separators() {
        assert_eq!(
            prompt_env_key("search.ecr-number"),
            "ECA_PROMPT_SEARCH_ECR_NUMBER"
        );
    }

    #[test]
    fn uses_override_before_default() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Silent,
            overrides(&[("ECA_PROMPT_SCOPE_SUMMARY", "Replace gasket")]),
        );
        let prompt = Prompt::input("scope.summary", "Summary", "old");
        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(result.as_string(), "Replace gasket");
    }

    #[test]
    fn falls_back_to_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let result = ui
            .prompt(&Prompt::confirm("go", "Continue?", true))
            .unwrap();
        assert_eq!(result, PromptResult::Bool(true));
    }

    #[test]
    fn confirm_override_is_a_bool() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Silent,
            overrides(&[("ECA_PROMPT_GO", "no")]),
        );
        let result = ui
            .prompt(&Prompt::confirm("go", "Continue?", true))
            .unwrap();
        assert_eq!(result, PromptResult::Bool(false));
    }

    #[test]
    fn multiselect_override_splits() {
        let mut ui = NonInteractiveUI::with_overrides(
            OutputMode::Silent,
            overrides(&[("ECA_PROMPT_FLAGS", "a, b")]),
        );
        let prompt = Prompt::multi_select(
            "flags",
            "Pick",
            vec![PromptOption::new("a", "A"), PromptOption::new("b", "B")],
            &[],
        );
        assert_eq!(
            ui.prompt(&prompt).unwrap(),
            PromptResult::Strings(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn missing_answer_is_an_error() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        let prompt = Prompt {
            key: "crb.members".into(),
            question: "CRB members".into(),
            prompt_type: PromptType::Input,
            default: None,
        };
        let err = ui.prompt(&prompt).unwrap_err();
        assert!(err.to_string().contains("ECA_PROMPT_CRB_MEMBERS"));
    }

    #[test]
    fn is_never_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        assert!(!ui.is_interactive());
    }
}
