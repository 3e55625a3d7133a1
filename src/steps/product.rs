//! Product change steps: affected items and the Product ECA table.

use crate::catalog::{group_rows, Catalog};
use crate::error::Result;
use crate::record::{
    AffectedItem, Answer, ChangeRecord, ChangeType, EcaRow, ImpactLevel, ItemSource, ProductData,
    ProductEcaData, RecordUpdate,
};
use crate::ui::{Prompt, PromptOption, UserInterface};
use crate::workflow::StepId;

use super::fields::{ask_choice, ask_text, require_text, slug};
use super::StepForm;

/// Affected items and the impact narrative.
#[derive(Debug, Clone)]
pub struct AffectedItemsForm {
    items: Vec<AffectedItem>,
    impact_analysis: String,
    object_types: Vec<String>,
}

impl AffectedItemsForm {
    pub fn from_record(record: &ChangeRecord, catalog: &Catalog) -> Self {
        let data = record.product_data.clone().unwrap_or_default();
        Self {
            items: data.affected_items,
            impact_analysis: data.impact_analysis,
            object_types: catalog.object_types(ChangeType::Product).to_vec(),
        }
    }

    pub fn items(&self) -> &[AffectedItem] {
        &self.items
    }

    fn remove_items(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        if self.items.is_empty() {
            return Ok(());
        }

        let options = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                PromptOption::new(
                    i.to_string(),
                    format!("{} {}", item.part_number, item.description)
                        .trim()
                        .to_string(),
                )
            })
            .collect();
        let answer = ui.prompt(&Prompt::multi_select(
            "product-affected.remove",
            "Remove affected items",
            options,
            &[],
        ))?;
        let remove: Vec<usize> = answer
            .as_strings()
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        let mut index = 0;
        self.items.retain(|_| {
            let keep = !remove.contains(&index);
            index += 1;
            keep
        });
        Ok(())
    }

    fn collect_item(&self, ui: &mut dyn UserInterface, part_number: &str) -> Result<AffectedItem> {
        let mut item = AffectedItem {
            part_number: part_number.to_string(),
            description: ask_item_field(ui, part_number, "description", "Description")?,
            revision: ask_item_field(ui, part_number, "revision", "Revision")?,
            ..Default::default()
        };

        let options = self
            .object_types
            .iter()
            .map(|t| PromptOption::new(t.as_str(), t.as_str()))
            .collect();
        item.object_type = ask_choice(
            ui,
            "product-affected.item.object-type",
            &format!("Object type ({})", part_number),
            options,
            self.object_types.first().map(String::as_str),
        )?;
        item.state = ask_item_field(ui, part_number, "state", "State")?;

        let options = [ItemSource::Structure, ItemSource::WhereUsed, ItemSource::Manual]
            .into_iter()
            .map(|s| PromptOption::new(s.label(), s.label()))
            .collect();
        let source = ask_choice(
            ui,
            "product-affected.item.source",
            &format!("Source ({})", part_number),
            options,
            Some(ItemSource::Manual.label()),
        )?;
        item.source = source.parse().unwrap_or_default();
        item.end_item = ask_item_field(ui, part_number, "end-item", "Affected end item")?;
        item.action = ask_item_field(ui, part_number, "action", "Action required")?;

        let details = ui.prompt(&Prompt::confirm(
            "product-affected.item.details",
            format!("Enter disposition and cost details for {}?", part_number),
            false,
        ))?;
        if details.as_bool() {
            item.disposition_in_stock =
                ask_item_field(ui, part_number, "in-stock", "Disposition: in stock")?;
            item.disposition_wip = ask_item_field(ui, part_number, "wip", "Disposition: WIP")?;
            item.disposition_finished_goods = ask_item_field(
                ui,
                part_number,
                "finished-goods",
                "Disposition: finished goods",
            )?;
            item.disposition_in_field =
                ask_item_field(ui, part_number, "in-field", "Disposition: in field")?;
            item.cost = ask_item_field(ui, part_number, "cost", "Cost")?;
            item.resource = ask_item_field(ui, part_number, "resource", "Resource")?;
            item.time = ask_item_field(ui, part_number, "time", "Time")?;
        }

        Ok(item)
    }
}

impl StepForm for AffectedItemsForm {
    fn id(&self) -> StepId {
        StepId::ProductAffected
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        if !self.items.is_empty() {
            ui.message(&format!("{} affected item(s) recorded", self.items.len()));
        }
        self.remove_items(ui)?;

        let added = ask_text(
            ui,
            "product-affected.add",
            "Part numbers to add (comma separated)",
            "",
        )?;
        for part_number in added.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let item = self.collect_item(ui, part_number)?;
            self.items.push(item);
        }

        self.impact_analysis = ask_text(
            ui,
            "product-affected.impact-analysis",
            "Impact analysis",
            &self.impact_analysis,
        )?;
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, &self.impact_analysis, "Impact analysis");
        problems
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            product_data: Some(Some(ProductData {
                affected_items: self.items.clone(),
                impact_analysis: self.impact_analysis.clone(),
            })),
            ..Default::default()
        }
    }
}

fn ask_item_field(
    ui: &mut dyn UserInterface,
    part_number: &str,
    field: &str,
    label: &str,
) -> Result<String> {
    ask_text(
        ui,
        &format!("product-affected.item.{}", field),
        &format!("{} ({})", label, part_number),
        "",
    )
}

/// The grouped Product ECA assessment table. Always valid.
#[derive(Debug, Clone)]
pub struct ProductEcaForm {
    affected_products: String,
    rows: Vec<EcaRow>,
}

impl ProductEcaForm {
    pub fn from_record(record: &ChangeRecord, catalog: &Catalog) -> Self {
        match &record.product_eca_data {
            Some(data) if !data.rows.is_empty() => Self {
                affected_products: data.affected_products.clone(),
                rows: data.rows.clone(),
            },
            saved => Self {
                affected_products: saved
                    .as_ref()
                    .map(|d| d.affected_products.clone())
                    .unwrap_or_default(),
                rows: catalog.seed_eca_rows(),
            },
        }
    }

    pub fn rows(&self) -> &[EcaRow] {
        &self.rows
    }

    fn collect_row(ui: &mut dyn UserInterface, row: &mut EcaRow) -> Result<()> {
        let key = format!("product-eca.{}", row.id);

        let mut options = vec![PromptOption::new("", "Unanswered")];
        options.extend(
            ImpactLevel::ALL
                .into_iter()
                .map(|level| PromptOption::new(level.as_str(), level.label())),
        );
        let raw = ask_choice(
            ui,
            &format!("{}.impact", key),
            &format!("Impact: {}", row.affected_sub_function),
            options,
            Some(row.impact.map(|i| i.as_str()).unwrap_or("")),
        )?;
        row.impact = raw.parse().ok();

        row.eca_team_member = ask_text(
            ui,
            &format!("{}.member", key),
            "ECA team member",
            &row.eca_team_member,
        )?;
        row.justification = ask_text(
            ui,
            &format!("{}.justification", key),
            &row.impact_analysis,
            &row.justification,
        )?;
        Ok(())
    }
}

impl StepForm for ProductEcaForm {
    fn id(&self) -> StepId {
        StepId::ProductEca
    }

    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()> {
        self.affected_products = ask_text(
            ui,
            "product-eca.affected-products",
            "Affected products (end items)",
            &self.affected_products,
        )?;

        let functions: Vec<(String, Vec<PromptOption>, Vec<String>)> = group_rows(&self.rows)
            .iter()
            .map(|group| {
                let rows = group.sub_functions.iter().flat_map(|s| s.rows.iter());
                let options = rows
                    .clone()
                    .map(|row| {
                        PromptOption::new(
                            row.id.as_str(),
                            format!("{}: {}", row.affected_sub_function, row.impact_analysis),
                        )
                    })
                    .collect();
                let affected = rows
                    .filter(|row| row.affected == Some(Answer::Yes))
                    .map(|row| row.id.clone())
                    .collect();
                (group.name.to_string(), options, affected)
            })
            .collect();

        for (function, options, affected) in functions {
            let ids: Vec<String> = options.iter().map(|o| o.value.clone()).collect();
            let defaults: Vec<&str> = affected.iter().map(String::as_str).collect();
            let answer = ui.prompt(&Prompt::multi_select(
                format!("product-eca.{}", slug(&function)),
                format!("Affected sub-functions in {}", function),
                options,
                &defaults,
            ))?;
            let selected = answer.as_strings();

            for row in self.rows.iter_mut().filter(|r| ids.contains(&r.id)) {
                if selected.contains(&row.id) {
                    row.affected = Some(Answer::Yes);
                    Self::collect_row(ui, row)?;
                } else {
                    row.affected = Some(Answer::No);
                    row.impact = None;
                }
            }
        }
        Ok(())
    }

    fn problems(&self) -> Vec<String> {
        Vec::new()
    }

    fn to_update(&self) -> RecordUpdate {
        RecordUpdate {
            product_eca_data: Some(Some(ProductEcaData {
                affected_products: self.affected_products.clone(),
                rows: self.rows.clone(),
            })),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    fn catalog() -> Catalog {
        Catalog::load().unwrap()
    }

    #[test]
    fn impact_analysis_is_required() {
        let form = AffectedItemsForm::from_record(&ChangeRecord::new(), &catalog());
        assert_eq!(form.problems(), vec!["Impact analysis is required"]);
    }

    #[test]
    fn adds_items_from_part_numbers() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("product-affected.add", "P-100, P-200");
        ui.set_prompt_response("product-affected.item.description", "Bracket");
        ui.set_prompt_response("product-affected.item.source", "Where Used");
        ui.set_prompt_response("product-affected.impact-analysis", "Two brackets change");

        let mut form = AffectedItemsForm::from_record(&ChangeRecord::new(), &catalog());
        form.collect(&mut ui).unwrap();

        assert!(form.is_valid());
        assert_eq!(form.items().len(), 2);
        assert_eq!(form.items()[1].part_number, "P-200");
        assert_eq!(form.items()[0].source, ItemSource::WhereUsed);
        assert_eq!(form.items()[0].object_type, "Part");
        assert!(form.items()[0].cost.is_empty());
    }

    #[test]
    fn details_are_collected_on_request() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("product-affected.add", "P-100");
        ui.set_prompt_response("product-affected.item.details", "yes");
        ui.set_prompt_response("product-affected.item.cost", "1200");

        let mut form = AffectedItemsForm::from_record(&ChangeRecord::new(), &catalog());
        form.collect(&mut ui).unwrap();

        assert_eq!(form.items()[0].cost, "1200");
    }

    #[test]
    fn removes_selected_items() {
        let mut record = ChangeRecord::new();
        record.product_data = Some(ProductData {
            affected_items: vec![
                AffectedItem {
                    part_number: "P-1".into(),
                    ..Default::default()
                },
                AffectedItem {
                    part_number: "P-2".into(),
                    ..Default::default()
                },
            ],
            impact_analysis: "Existing".into(),
        });

        let mut ui = MockUI::new();
        ui.set_prompt_response("product-affected.remove", "0");

        let mut form = AffectedItemsForm::from_record(&record, &catalog());
        form.collect(&mut ui).unwrap();

        assert_eq!(form.items().len(), 1);
        assert_eq!(form.items()[0].part_number, "P-2");
        assert!(form.is_valid());
    }

    #[test]
    fn eca_form_seeds_all_rows() {
        let form = ProductEcaForm::from_record(&ChangeRecord::new(), &catalog());
        assert_eq!(form.rows().len(), 51);
        assert!(form.rows().iter().all(|r| r.affected.is_none()));
        assert!(form.is_valid());
    }

    #[test]
    fn eca_form_marks_selected_rows_affected() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("product-eca.program-management", "1");
        ui.set_prompt_response("product-eca.1.impact", "high");
        ui.set_prompt_response("product-eca.1.member", "P. Owner");

        let mut form = ProductEcaForm::from_record(&ChangeRecord::new(), &catalog());
        form.collect(&mut ui).unwrap();

        let first = &form.rows()[0];
        assert_eq!(first.affected, Some(Answer::Yes));
        assert_eq!(first.impact, Some(ImpactLevel::High));
        assert_eq!(first.eca_team_member, "P. Owner");

        let second = &form.rows()[1];
        assert_eq!(second.affected, Some(Answer::No));
        assert!(second.impact.is_none());
    }

    #[test]
    fn eca_form_keeps_guidance_as_justification() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("product-eca.program-management", "2");

        let mut form = ProductEcaForm::from_record(&ChangeRecord::new(), &catalog());
        form.collect(&mut ui).unwrap();

        assert!(form.rows()[1]
            .justification
            .starts_with("1-Identify all Problem Reports"));
        assert!(form.rows()[1].impact.is_none());
    }

    #[test]
    fn eca_form_keeps_saved_rows() {
        let catalog = catalog();
        let mut rows = catalog.seed_eca_rows();
        rows[0].affected = Some(Answer::Yes);
        let mut record = ChangeRecord::new();
        record.product_eca_data = Some(ProductEcaData {
            affected_products: "Monitor X".into(),
            rows,
        });

        let form = ProductEcaForm::from_record(&record, &catalog);
        assert_eq!(form.rows()[0].affected, Some(Answer::Yes));
        let data = form.to_update().product_eca_data.flatten().unwrap();
        assert_eq!(data.affected_products, "Monitor X");
    }
}
