//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use eca_wizard::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("search.ecr-number", "ECR-2024-001");
//!
//! let answer = ui
//!     .prompt(&Prompt::input("search.ecr-number", "ECR number", ""))
//!     .unwrap();
//! assert_eq!(answer.as_string(), "ECR-2024-001");
//!
//! ui.success("Done!");
//! assert!(ui.has_success("Done"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{
    OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, StepBanner, UserInterface,
};

/// Mock UI implementation for testing.
///
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked more than once.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(usize, usize)>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    /// Fallback response for any prompt key not configured explicitly.
    default_prompt_response: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set multiple prompt responses at once.
    pub fn with_prompt_responses(mut self, responses: HashMap<String, String>) -> Self {
        self.prompt_responses = responses;
        self
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set a response for any prompt key not explicitly configured.
    pub fn set_default_prompt_response(&mut self, response: &str) {
        self.default_prompt_response = Some(response.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn progress(&self) -> &[(usize, usize)] {
        &self.progress
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.progress.clear();
        self.spinners.clear();
        self.prompts_shown.clear();
    }

    fn scripted_answer(&mut self, key: &str) -> Option<String> {
        if let Some(response) = self
            .prompt_queues
            .get_mut(key)
            .and_then(|queue| queue.pop_front())
        {
            return Some(response);
        }
        self.prompt_responses
            .get(key)
            .or(self.default_prompt_response.as_ref())
            .cloned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(raw) = self
            .scripted_answer(&prompt.key)
            .or_else(|| prompt.default.clone())
        {
            return Ok(PromptResult::from_raw(&prompt.prompt_type, &raw));
        }

        // Type-appropriate empty answer as a last resort.
        Ok(match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(false),
            PromptType::MultiSelect { .. } => PromptResult::Strings(Vec::new()),
            _ => PromptResult::String(String::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_step(&mut self, step: &StepBanner) {
        self.headers.push(step.title.clone());
        self.progress.push((step.position, step.total));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    succeeded: Option<bool>,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// `Some(true)` after `finish_success`, `Some(false)` after `finish_error`.
    pub fn succeeded(&self) -> Option<bool> {
        self.succeeded
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.succeeded = Some(true);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.succeeded = Some(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn input(key: &str) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "?".to_string(),
            prompt_type: PromptType::Input,
            default: None,
        }
    }

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("search.ecr-number", "ECR-7");

        let result = ui.prompt(&input("search.ecr-number")).unwrap();
        assert_eq!(result.as_string(), "ECR-7");
        assert_eq!(ui.prompts_shown(), &["search.ecr-number"]);
    }

    #[test]
    fn mock_ui_prompt_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui
            .prompt(&Prompt::input("scope.summary", "Summary", "Existing"))
            .unwrap();
        assert_eq!(result.as_string(), "Existing");
    }

    #[test]
    fn default_response_wins_over_prompt_default() {
        let mut ui = MockUI::new();
        ui.set_default_prompt_response("scripted");
        let result = ui
            .prompt(&Prompt::input("scope.summary", "Summary", "Existing"))
            .unwrap();
        assert_eq!(result.as_string(), "scripted");
    }

    #[test]
    fn mock_ui_captures_spinners_progress_and_headers() {
        let mut ui = MockUI::new();

        let _spinner = ui.start_spinner("Writing export");
        ui.show_step(&StepBanner::new("ECR Search & Classification", 1, 5));
        ui.show_step(&StepBanner::new("Scope of Change", 2, 5));

        assert_eq!(ui.spinners(), &["Writing export"]);
        assert_eq!(ui.progress(), &[(1, 5), (2, 5)]);
        assert_eq!(ui.headers(), &["ECR Search & Classification", "Scope of Change"]);
    }

    #[test]
    fn mock_ui_clear_resets() {
        let mut ui = MockUI::new();

        ui.message("test");
        ui.success("done");
        ui.clear();

        assert!(ui.messages().is_empty());
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn mock_ui_has_helpers() {
        let mut ui = MockUI::new();

        ui.message("Loading record");
        ui.success("Export written");
        ui.warning("No EM or SD selected");
        ui.error("Failed to write");

        assert!(ui.has_message("Loading"));
        assert!(ui.has_success("Export"));
        assert!(ui.has_warning("EM or SD"));
        assert!(ui.has_error("Failed"));
        assert!(!ui.has_message("not there"));
    }

    #[test]
    fn mock_ui_output_mode_and_interactivity() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(!ui.is_interactive());

        ui.set_interactive(true);
        assert!(ui.is_interactive());
    }

    #[test]
    fn mock_spinner_captures_finish() {
        let mut spinner = MockSpinner::new();

        spinner.set_message("Working...");
        spinner.finish_success("Done!");

        assert_eq!(spinner.messages(), &["Working..."]);
        assert_eq!(spinner.finish_message(), Some("Done!"));
        assert_eq!(spinner.succeeded(), Some(true));
    }

    #[test]
    fn mock_spinner_error_status() {
        let mut spinner = MockSpinner::new();
        spinner.finish_error("Failed!");
        assert_eq!(spinner.succeeded(), Some(false));
    }

    #[test]
    fn mock_ui_with_prompt_responses() {
        let mut responses = HashMap::new();
        responses.insert("key1".to_string(), "value1".to_string());
        responses.insert("key2".to_string(), "value2".to_string());

        let mut ui = MockUI::new().with_prompt_responses(responses);

        assert_eq!(ui.prompt(&input("key1")).unwrap().as_string(), "value1");
        assert_eq!(ui.prompt(&input("key2")).unwrap().as_string(), "value2");
    }

    #[test]
    fn mock_ui_multiselect_returns_strings() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("qsr.flags", "qsr-datasets,training");

        let prompt = Prompt::multi_select(
            "qsr.flags",
            "Select",
            vec![
                PromptOption::new("qsr-datasets", "QSR datasets"),
                PromptOption::new("training", "Training documents"),
            ],
            &[],
        );

        let result = ui.prompt(&prompt).unwrap();
        assert_eq!(
            result,
            PromptResult::Strings(vec!["qsr-datasets".into(), "training".into()])
        );
    }

    #[test]
    fn mock_ui_empty_answers_by_type() {
        let mut ui = MockUI::new();

        let multi = Prompt {
            key: "m".into(),
            question: "?".into(),
            prompt_type: PromptType::MultiSelect { options: vec![] },
            default: None,
        };
        let confirm = Prompt {
            key: "c".into(),
            question: "?".into(),
            prompt_type: PromptType::Confirm,
            default: None,
        };

        assert_eq!(ui.prompt(&multi).unwrap(), PromptResult::Strings(vec![]));
        assert_eq!(ui.prompt(&confirm).unwrap(), PromptResult::Bool(false));
        assert_eq!(ui.prompt(&input("i")).unwrap().as_string(), "");
    }

    #[test]
    fn mock_ui_confirm_parses_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("go", "no");
        let result = ui
            .prompt(&Prompt::confirm("go", "Continue?", true))
            .unwrap();
        assert!(!result.as_bool());
    }

    #[test]
    fn mock_ui_queued_responses_returned_in_order() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("nav", vec!["continue", "back"]);

        assert_eq!(ui.prompt(&input("nav")).unwrap().as_string(), "continue");
        assert_eq!(ui.prompt(&input("nav")).unwrap().as_string(), "back");
        assert_eq!(ui.prompt(&input("nav")).unwrap().as_string(), "");
    }

    #[test]
    fn mock_ui_queued_responses_fallback_to_set_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("key", "fallback");
        ui.queue_prompt_responses("key", vec!["first"]);

        assert_eq!(ui.prompt(&input("key")).unwrap().as_string(), "first");
        assert_eq!(ui.prompt(&input("key")).unwrap().as_string(), "fallback");
    }
}
