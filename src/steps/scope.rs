//! Scope of change.

use crate::error::Result;
use crate::record::{ChangeRecord, RecordUpdate};
use crate::ui::UserInterface;
use crate::workflow::StepId;

use super::fields::{ask_text, require_text};
use super::StepForm;

/// What is changing and why.
#[derive(Debug, Clone, Default)]
pub struct ScopeForm {
    scope_of_change: String,
    change_summary: String,
}

impl ScopeForm {
    pub fn from_record(record: &ChangeRecord) -> Self {
        Self {
            scope_of_change: record.scope_of_change.clone(),
            change_summary: record.change_summary.clone(),
        }
    }
}

impl StepForm for ScopeForm {
    fn id(&self) -> StepId {
        StepId::Scope
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.scope_of_change = ask_text(
            ui,
            "scope.scope",
            "Scope of change",
            &self.scope_of_change,
        )?;
        self.change_summary = ask_text(
            ui,
            "scope.summary",
            "Summary of change",
            &self.change_summary,
        )?;
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, &self.scope_of_change, "Scope of change");
        require_text(&mut problems, &self.change_summary, "Summary of change");
        problems
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            scope_of_change: Some(self.scope_of_change.clone()),
            change_summary: Some(self.change_summary.clone()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn requires_both_fields() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("scope.scope", "Replace gasket material");

        let mut form = ScopeForm::default();
        form.collect(&mut ui).unwrap();

        assert_eq!(form.problems(), vec!["Summary of change is required"]);
    }

    #[test]
    fn keeps_existing_answers() {
        let mut record = ChangeRecord::new();
        record.scope_of_change = "Existing scope".into();
        record.change_summary = "Existing summary".into();

        let mut form = ScopeForm::from_record(&record);
        form.collect(&mut MockUI::new()).unwrap();

        assert!(form.is_valid());
        let update = form.to_update();
        assert_eq!(update.scope_of_change.as_deref(), Some("Existing scope"));
        assert!(update.ecr_number.is_none());
    }
}
