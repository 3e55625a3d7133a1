//! Prompt helpers shared by the step forms.

use crate::error::Result;
use crate::record::{Answer, Assessment};
use crate::ui::{Prompt, PromptOption, UserInterface};

/// Ask for free text, pre-filled with the current value.
pub(crate) fn ask_text(
    ui: &mut dyn UserInterface,
    key: &str,
    question: &str,
    current: &str,
) -> Result<String> {
    let answer = ui.prompt(&Prompt::input(key, question, current))?;
    Ok(answer.as_string().trim().to_string())
}

/// Ask for one of `options`, defaulting to `current`.
pub(crate) fn ask_choice(
    ui: &mut dyn UserInterface,
    key: &str,
    question: &str,
    options: Vec<PromptOption>,
    current: Option<&str>,
) -> Result<String> {
    let answer = ui.prompt(&Prompt::select(key, question, options, current))?;
    Ok(answer.as_string())
}

/// Ask a yes/no question that may still be unanswered.
///
/// Anything other than yes or no leaves the question unanswered.
pub(crate) fn ask_answer(
    ui: &mut dyn UserInterface,
    key: &str,
    question: &str,
    current: Option<Answer>,
) -> Result<Option<Answer>> {
    let options = vec![
        PromptOption::new(Answer::Yes.as_str(), Answer::Yes.label()),
        PromptOption::new(Answer::No.as_str(), Answer::No.label()),
    ];
    let raw = ask_choice(ui, key, question, options, current.map(|a| a.as_str()))?;
    Ok(raw.parse().ok())
}

/// Ask an assessment question, its reason for "no" and its justification.
pub(crate) fn collect_assessment(
    ui: &mut dyn UserInterface,
    prefix: &str,
    assessment: &mut Assessment,
    no_reasons: &[String],
) -> Result<()> {
    let key = format!("{}.{}", prefix, assessment.id);
    let answer = ask_answer(ui, &key, &assessment.question, assessment.answer)?;
    assessment.set_answer(answer);

    if answer == Some(Answer::No) {
        let mut options: Vec<PromptOption> = no_reasons
            .iter()
            .map(|r| PromptOption::new(r.as_str(), r.as_str()))
            .collect();
        let current = assessment.no_reason.trim();
        if !current.is_empty() && !no_reasons.iter().any(|r| r == current) {
            options.push(PromptOption::new(current, current));
        }
        let current = (!current.is_empty()).then(|| current.to_string());
        assessment.no_reason = ask_choice(
            ui,
            &format!("{}.reason", key),
            "Reason for No",
            options,
            current.as_deref(),
        )?;
    }

    assessment.justification = ask_text(
        ui,
        &format!("{}.justification", key),
        "Comment/Justification",
        &assessment.justification,
    )?;
    Ok(())
}

/// Problems with a list of assessments, labelled by question number.
pub(crate) fn assessment_problems(label: &str, assessments: &[Assessment]) -> Vec<String> {
    assessments
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.is_complete())
        .map(|(i, a)| match a.answer {
            None => format!("{} question {} is unanswered", label, i + 1),
            Some(_) => format!("{} question {} needs a reason for No", label, i + 1),
        })
        .collect()
}

/// Push a problem when a required text field is blank.
pub(crate) fn require_text(problems: &mut Vec<String>, value: &str, label: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{} is required", label));
    }
}

/// Lowercase, dash-separated form of a label for use in prompt keys.
pub(crate) fn slug(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
