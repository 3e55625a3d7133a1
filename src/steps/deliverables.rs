//! Minimum deliverables.

use crate::error::Result;
use crate::record::{ChangeRecord, RecordUpdate};
use crate::ui::UserInterface;
use crate::workflow::StepId;

use super::fields::ask_text;
use super::StepForm;

/// Free-text list of the minimum deliverables. Always valid.
#[derive(Debug, Clone, Default)]
pub struct DeliverablesForm {
    minimum_deliverables: String,
}

impl DeliverablesForm {
    pub fn from_record(record: &ChangeRecord) -> Self {
        Self {
            minimum_deliverables: record.minimum_deliverables.clone(),
        }
    }
}

impl StepForm for DeliverablesForm {
    fn id(&self) -> StepId {
        StepId::Deliverables
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.minimum_deliverables = ask_text(
            ui,
            "deliverables.minimum",
            "Minimum deliverables",
            &self.minimum_deliverables,
        )?;
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        Vec::new()
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            minimum_deliverables: Some(self.minimum_deliverables.clone()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn blank_is_valid() {
        let mut form = DeliverablesForm::default();
        form.collect(&mut MockUI::new()).unwrap();
        assert!(form.is_valid());
        assert_eq!(form.to_update().minimum_deliverables.as_deref(), Some(""));
    }
}
