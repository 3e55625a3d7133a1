//! Review before export.

use crate::error::Result;
use crate::export::export_tab_names;
use crate::record::{ChangeRecord, RecordUpdate};
use crate::ui::{Table, UserInterface};
use crate::workflow::StepId;

use super::StepForm;

/// Read-only summary of the record and the sheets an export will contain.
#[derive(Debug, Clone)]
pub struct ReviewForm {
    summary: Vec<(&'static str, String)>,
    tabs: Vec<&'static str>,
}

impl ReviewForm {
    pub fn from_record(record: &ChangeRecord) -> Self {
        let eca_types = record
            .required_eca_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let score = record
            .total_complexity_score
            .map(|s| s.to_string())
            .unwrap_or_default();

        let summary = vec![
            ("ECR Number", record.ecr_number.clone()),
            ("Document Number", record.document_number.clone()),
            (
                "Change Type",
                record
                    .change_type
                    .map(|t| t.label().to_string())
                    .unwrap_or_default(),
            ),
            ("Object Type", record.object_type.clone()),
            ("Required ECA Types", eca_types),
            ("Complexity Score", score),
            (
                "Routing",
                record
                    .track_type
                    .map(|t| t.label().to_string())
                    .unwrap_or_default(),
            ),
        ];

        Self {
            summary,
            tabs: export_tab_names(record),
        }
    }

    pub fn summary(&self) -> &[(&'static str, String)] {
        &self.summary
    }

    /// Sheets the export will contain, in order.
    pub fn tabs(&self) -> &[&'static str] {
        &self.tabs
    }

    /// The summary rendered as a table.
    pub fn render_summary(&self) -> String {
        let mut table = Table::new(vec!["Field", "Value"]);
        for (field, value) in &self.summary {
            table.add_row(vec![*field, value.as_str()]);
        }
        table.render()
    }
}

impl StepForm for ReviewForm {
    fn id(&self) -> StepId {
        StepId::Review
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        ui.message(&self.render_summary());
        ui.message("Export will contain:");
        for (i, tab) in self.tabs.iter().enumerate() {
            ui.message(&format!("  {}. {}", i + 1, tab));
        }
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        Vec::new()
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate::new()
    }
}
