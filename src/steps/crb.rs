//! Change Review Board and Change Implementation Board members.

use crate::error::Result;
use crate::record::{ChangeRecord, RecordUpdate};
use crate::ui::UserInterface;
use crate::workflow::StepId;

use super::fields::{ask_text, require_text};
use super::StepForm;

/// Board membership for full-track changes.
#[derive(Debug, Clone, Default)]
pub struct CrbForm {
    crb_members: String,
    cib_members: String,
    approval_notes: String,
}

impl CrbForm {
    pub fn from_record(record: &ChangeRecord) -> Self {
        Self {
            crb_members: record.crb_members.clone(),
            cib_members: record.cib_members.clone(),
            approval_notes: record.approval_notes.clone(),
        }
    }
}

impl StepForm for CrbForm {
    fn id(&self) -> StepId {
        StepId::Crb
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.crb_members = ask_text(ui, "crb.crb-members", "CRB members", &self.crb_members)?;
        self.cib_members = ask_text(ui, "crb.cib-members", "CIB members", &self.cib_members)?;
        self.approval_notes = ask_text(
            ui,
            "crb.approval-notes",
            "Approval notes",
            &self.approval_notes,
        )?;
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, &self.crb_members, "CRB members");
        require_text(&mut problems, &self.cib_members, "CIB members");
        problems
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            crb_members: Some(self.crb_members.clone()),
            cib_members: Some(self.cib_members.clone()),
            approval_notes: Some(self.approval_notes.clone()),
            ..Default::default()
        }
    }
}
