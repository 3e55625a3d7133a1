//! ECR search and classification.
//!
//! The first step identifies the change and classifies it. Classification
//! is where the branch invariants are enforced: a product change carries no
//! manufacturing determination and vice versa, and the QSR and EM/SD flag
//! groups keep their exclusivity through the determination setters.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::record::{
    required_eca_types, ChangeRecord, ChangeType, ManufacturingDetermination, ProductTypeOptions,
    QsrDetermination, RecordUpdate,
};
use crate::ui::{Prompt, PromptOption, UserInterface};
use crate::workflow::StepId;

use super::fields::{ask_choice, ask_text, require_text};
use super::StepForm;

const QSR_DATASETS: &str = "qsr-datasets";
const QUALITY_DATASETS: &str = "quality-datasets";
const TRAINING_DOCUMENTS: &str = "training-documents";
const NONE_OF_ABOVE: &str = "none";

const PART_OBJECTS: &str = "part-objects";
const DESIGN_DATASETS: &str = "product-design-datasets";
const PROTOCOL_REPORT: &str = "protocol-report";

const DESIGN_IN_MFG: &str = "product-design-in-mfg";
const MFG_DATASETS_EM: &str = "mfg-datasets-em";
const SERVICE_DATASETS: &str = "service-datasets";
const MFG_DATASETS_SD: &str = "mfg-datasets-sd";

/// Identity and classification of the change.
#[derive(Debug, Clone)]
pub struct SearchForm {
    ecr_number: String,
    document_number: String,
    document_type: String,
    document_version: String,
    document_state: String,
    change_type: Option<ChangeType>,
    object_type: String,
    product_options: ProductTypeOptions,
    manufacturing: ManufacturingDetermination,
    qsr: QsrDetermination,
    product_object_types: Vec<String>,
    manufacturing_object_types: Vec<String>,
}

impl SearchForm {
    pub fn from_record(record: &ChangeRecord, catalog: &Catalog) -> Self {
        Self {
            ecr_number: record.ecr_number.clone(),
            document_number: record.document_number.clone(),
            document_type: record.document_type.clone(),
            document_version: record.document_version.clone(),
            document_state: record.document_state.clone(),
            change_type: record.change_type,
            object_type: record.object_type.clone(),
            product_options: record.product_type_options.unwrap_or_default(),
            manufacturing: record.manufacturing_determination.unwrap_or_default(),
            qsr: record.qsr_determination.unwrap_or_default(),
            product_object_types: catalog.object_types(ChangeType::Product).to_vec(),
            manufacturing_object_types: catalog.object_types(ChangeType::Manufacturing).to_vec(),
        }
    }

    pub fn change_type(&self) -> Option<ChangeType> {
        self.change_type
    }

    pub fn qsr(&self) -> &QsrDetermination {
        &self.qsr
    }

    pub fn manufacturing(&self) -> &ManufacturingDetermination {
        &self.manufacturing
    }

    fn object_types(&self, change_type: ChangeType) -> &[String] {
        match change_type {
            ChangeType::Product => &self.product_object_types,
            ChangeType::Manufacturing => &self.manufacturing_object_types,
        }
    }

    /// Switch the classification.
    ///
    /// An object type that is not offered for the new change type is cleared.
    pub fn set_change_type(&mut self, change_type: ChangeType) {
        if !self
            .object_types(change_type)
            .iter()
            .any(|t| *t == self.object_type)
        {
            self.object_type.clear();
        }
        self.change_type = Some(change_type);
    }

    /// Apply selected QSR options. Inclusions win over "none of the above".
    pub fn select_qsr(&mut self, selected: &[String]) {
        let has = |value: &str| selected.iter().any(|s| s == value);
        let mut qsr = QsrDetermination::default();
        if has(NONE_OF_ABOVE) {
            qsr.set_none_of_above(true);
        }
        if has(QSR_DATASETS) {
            qsr.set_includes_qsr_datasets(true);
        }
        if has(QUALITY_DATASETS) {
            qsr.set_includes_quality_datasets(true);
        }
        if has(TRAINING_DOCUMENTS) {
            qsr.set_includes_training_documents(true);
        }
        self.qsr = qsr;
    }

    /// Apply selected manufacturing options. The EM group wins over SD.
    pub fn select_manufacturing(&mut self, selected: &[String]) {
        let has = |value: &str| selected.iter().any(|s| s == value);
        let mut determination = ManufacturingDetermination::default();
        if has(MFG_DATASETS_SD) {
            determination.set_includes_mfg_datasets_sd(true);
        }
        if has(DESIGN_IN_MFG) {
            determination.set_includes_product_design_in_mfg(true);
        }
        if has(MFG_DATASETS_EM) {
            determination.set_includes_mfg_datasets_em(true);
        }
        if has(SERVICE_DATASETS) {
            determination.set_includes_service_datasets(true);
        }
        self.manufacturing = determination;
    }

    pub fn select_product_options(&mut self, selected: &[String]) {
        let has = |value: &str| selected.iter().any(|s| s == value);
        self.product_options = ProductTypeOptions {
            includes_part_objects: has(PART_OBJECTS),
            includes_product_design_datasets: has(DESIGN_DATASETS),
            includes_protocol_report: has(PROTOCOL_REPORT),
        };
    }

    fn qsr_selection(&self) -> Vec<&'static str> {
        let mut selected = Vec::new();
        if self.qsr.includes_qsr_datasets() {
            selected.push(QSR_DATASETS);
        }
        if self.qsr.includes_quality_datasets() {
            selected.push(QUALITY_DATASETS);
        }
        if self.qsr.includes_training_documents() {
            selected.push(TRAINING_DOCUMENTS);
        }
        if self.qsr.is_none_of_above() {
            selected.push(NONE_OF_ABOVE);
        }
        selected
    }

    fn product_selection(&self) -> Vec<&'static str> {
        let options = &self.product_options;
        [
            (options.includes_part_objects, PART_OBJECTS),
            (options.includes_product_design_datasets, DESIGN_DATASETS),
            (options.includes_protocol_report, PROTOCOL_REPORT),
        ]
        .into_iter()
        .filter_map(|(set, value)| set.then_some(value))
        .collect()
    }

    fn manufacturing_selection(&self) -> Vec<&'static str> {
        let m = &self.manufacturing;
        [
            (m.includes_product_design_in_mfg(), DESIGN_IN_MFG),
            (m.includes_mfg_datasets_em(), MFG_DATASETS_EM),
            (m.includes_service_datasets(), SERVICE_DATASETS),
            (m.includes_mfg_datasets_sd(), MFG_DATASETS_SD),
        ]
        .into_iter()
        .filter_map(|(set, value)| set.then_some(value))
        .collect()
    }
}

impl StepForm for SearchForm {
    fn id(&self) -> StepId {
        StepId::Search
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.ecr_number = ask_text(ui, "search.ecr-number", "ECR number", &self.ecr_number)?;
        self.document_number = ask_text(
            ui,
            "search.document-number",
            "Document number",
            &self.document_number,
        )?;
        self.document_type = ask_text(
            ui,
            "search.document-type",
            "Document type",
            &self.document_type,
        )?;
        self.document_version = ask_text(
            ui,
            "search.document-version",
            "Document version",
            &self.document_version,
        )?;
        self.document_state = ask_text(
            ui,
            "search.document-state",
            "Document state",
            &self.document_state,
        )?;

        let options = [ChangeType::Product, ChangeType::Manufacturing]
            .into_iter()
            .map(|t| PromptOption::new(t.as_str(), t.label()))
            .collect();
        let raw = ask_choice(
            ui,
            "search.change-type",
            "Type of change",
            options,
            self.change_type.map(|t| t.as_str()),
        )?;
        let Ok(change_type) = raw.parse::<ChangeType>() else {
            debug!(value = %raw, "No change type selected");
            return Ok(());
        };
        self.set_change_type(change_type);

        let options = self
            .object_types(change_type)
            .iter()
            .map(|t| PromptOption::new(t.as_str(), t.as_str()))
            .collect();
        let current = (!self.object_type.is_empty()).then(|| self.object_type.clone());
        self.object_type = ask_choice(
            ui,
            "search.object-type",
            "Object type",
            options,
            current.as_deref(),
        )?;

        match change_type {
            ChangeType::Product => {
                let options = vec![
                    PromptOption::new(PART_OBJECTS, "Includes part objects"),
                    PromptOption::new(DESIGN_DATASETS, "Includes product design datasets"),
                    PromptOption::new(PROTOCOL_REPORT, "Includes protocol/report"),
                ];
                let answer = ui.prompt(&Prompt::multi_select(
                    "search.product-criteria",
                    "Product change criteria",
                    options,
                    &self.product_selection(),
                ))?;
                self.select_product_options(&answer.as_strings());
            }
            ChangeType::Manufacturing => {
                let options = vec![
                    PromptOption::new(DESIGN_IN_MFG, "Product design used in manufacturing (EM)"),
                    PromptOption::new(MFG_DATASETS_EM, "Manufacturing datasets (EM)"),
                    PromptOption::new(SERVICE_DATASETS, "Service datasets (EM)"),
                    PromptOption::new(MFG_DATASETS_SD, "Manufacturing datasets (SD)"),
                ];
                let answer = ui.prompt(&Prompt::multi_select(
                    "search.manufacturing",
                    "Manufacturing determination",
                    options,
                    &self.manufacturing_selection(),
                ))?;
                let selected = answer.as_strings();
                self.select_manufacturing(&selected);
                if selected.iter().any(|s| s == MFG_DATASETS_SD) && self.manufacturing.needs_em() {
                    ui.warning("SD datasets cannot be combined with EM datasets; keeping EM");
                }
            }
        }

        let options = vec![
            PromptOption::new(QSR_DATASETS, "Includes QSR datasets"),
            PromptOption::new(QUALITY_DATASETS, "Includes quality datasets"),
            PromptOption::new(TRAINING_DOCUMENTS, "Includes training documents"),
            PromptOption::new(NONE_OF_ABOVE, "None of the above"),
        ];
        let answer = ui.prompt(&Prompt::multi_select(
            "search.qsr",
            "QSR determination",
            options,
            &self.qsr_selection(),
        ))?;
        let selected = answer.as_strings();
        self.select_qsr(&selected);
        if selected.iter().any(|s| s == NONE_OF_ABOVE) && self.qsr.needs_qsr() {
            ui.warning("\"None of the above\" was dropped because QSR options were selected");
        }

        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, &self.ecr_number, "ECR number");
        require_text(&mut problems, &self.document_number, "Document number");

        match self.change_type {
            None => problems.push("Type of change is required".to_string()),
            Some(ChangeType::Product) if !self.product_options.any() => {
                problems.push("Select at least one product change criterion".to_string())
            }
            Some(_) => {}
        }

        require_text(&mut problems, &self.object_type, "Object type");

        if !self.qsr.is_answered() {
            problems.push("Select a QSR option or \"None of the above\"".to_string());
        }

        problems
    }

    fn to_update(&self) -> RecordUpdate {
        let product = self.change_type == Some(ChangeType::Product);
        let manufacturing = self.change_type == Some(ChangeType::Manufacturing);

        let manufacturing_branch =
            manufacturing && (self.manufacturing.needs_em() || self.manufacturing.needs_sd());

        RecordUpdate {
            ecr_number: Some(self.ecr_number.clone()),
            document_number: Some(self.document_number.clone()),
            document_type: Some(self.document_type.clone()),
            document_version: Some(self.document_version.clone()),
            document_state: Some(self.document_state.clone()),
            object_type: Some(self.object_type.clone()),
            change_type: Some(self.change_type),
            qsr_determination: Some(Some(self.qsr)),
            product_type_options: Some(product.then_some(self.product_options)),
            manufacturing_determination: Some(manufacturing.then_some(self.manufacturing)),
            required_eca_types: Some(required_eca_types(
                self.change_type,
                Some(&self.qsr),
                manufacturing.then_some(&self.manufacturing),
            )),
            ..Default::default()
        }
        .clear_inactive_branches(self.qsr.needs_qsr(), product, manufacturing_branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EcaType;
    use crate::ui::MockUI;

    fn form() -> SearchForm {
        SearchForm::from_record(&ChangeRecord::new(), &Catalog::load().unwrap())
    }

    fn scripted(change_type: &str, object_type: &str) -> MockUI {
        let mut ui = MockUI::new();
        ui.set_prompt_response("search.ecr-number", "ECR-2024-001");
        ui.set_prompt_response("search.document-number", "D-100");
        ui.set_prompt_response("search.change-type", change_type);
        ui.set_prompt_response("search.object-type", object_type);
        ui
    }

    #[test]
    fn product_change_collects_criteria() {
        let mut ui = scripted("product", "Part");
        ui.set_prompt_response("search.product-criteria", "part-objects");
        ui.set_prompt_response("search.qsr", "none");

        let mut form = form();
        form.collect(&mut ui).unwrap();

        assert!(form.is_valid(), "{:?}", form.problems());
        assert!(!ui
            .prompts_shown()
            .contains(&"search.manufacturing".to_string()));

        let update = form.to_update();
        assert_eq!(update.manufacturing_determination, Some(None));
        assert_eq!(update.required_eca_types, Some(vec![EcaType::Product]));
    }

    #[test]
    fn classification_clears_answers_of_inactive_branches() {
        let mut ui = scripted("product", "Part");
        ui.set_prompt_response("search.product-criteria", "part-objects");
        ui.set_prompt_response("search.qsr", "none");

        let mut form = form();
        form.collect(&mut ui).unwrap();
        let update = form.to_update();

        assert_eq!(update.qsr_assessment, Some(None));
        assert_eq!(update.manufacturing_data, Some(None));
        assert_eq!(update.product_data, None);
        assert_eq!(update.product_eca_data, None);
    }

    #[test]
    fn product_change_needs_a_criterion() {
        let mut ui = scripted("product", "Part");
        ui.set_prompt_response("search.qsr", "none");

        let mut form = form();
        form.collect(&mut ui).unwrap();

        assert!(!form.is_valid());
        assert!(form
            .problems()
            .iter()
            .any(|p| p.contains("product change criterion")));
    }

    #[test]
    fn manufacturing_change_clears_product_options() {
        let mut ui = scripted("manufacturing", "SOP");
        ui.set_prompt_response("search.manufacturing", "mfg-datasets-em");
        ui.set_prompt_response("search.qsr", "qsr-datasets");

        let mut form = form();
        form.collect(&mut ui).unwrap();

        let update = form.to_update();
        assert_eq!(update.product_type_options, Some(None));
        assert_eq!(
            update.required_eca_types,
            Some(vec![EcaType::Qsr, EcaType::Em])
        );
    }

    #[test]
    fn em_selection_wins_over_sd() {
        let mut ui = scripted("manufacturing", "SOP");
        ui.set_prompt_response("search.manufacturing", "mfg-datasets-sd,service-datasets");
        ui.set_prompt_response("search.qsr", "none");

        let mut form = form();
        form.collect(&mut ui).unwrap();

        assert!(form.manufacturing().needs_em());
        assert!(!form.manufacturing().needs_sd());
        assert!(ui.has_warning("keeping EM"));
    }

    #[test]
    fn qsr_inclusion_wins_over_none() {
        let mut form = form();
        form.select_qsr(&["none".to_string(), "training-documents".to_string()]);
        assert!(form.qsr().needs_qsr());
        assert!(!form.qsr().is_none_of_above());
    }

    #[test]
    fn unanswered_qsr_blocks_continue() {
        let mut ui = scripted("manufacturing", "SOP");

        let mut form = form();
        form.collect(&mut ui).unwrap();

        assert!(form.problems().iter().any(|p| p.contains("QSR option")));
    }

    #[test]
    fn switching_change_type_drops_foreign_object_type() {
        let mut form = form();
        form.set_change_type(ChangeType::Product);
        form.object_type = "Part".into();

        form.set_change_type(ChangeType::Manufacturing);
        assert!(form.object_type.is_empty());
    }

    #[test]
    fn prefills_from_record() {
        let mut record = ChangeRecord::new();
        record.ecr_number = "ECR-9".into();
        record.change_type = Some(ChangeType::Manufacturing);
        let form = SearchForm::from_record(&record, &Catalog::load().unwrap());
        assert_eq!(form.ecr_number, "ECR-9");
        assert_eq!(form.change_type(), Some(ChangeType::Manufacturing));
    }
}
