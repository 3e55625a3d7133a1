//! Projection of a change record into export sheets.
//!
//! Sheet inclusion mirrors the step sequence: `CRB-CIB` only on the full
//! track, the product sheets only for product changes, the manufacturing
//! sheet only for manufacturing changes.

use super::model::{Cell, Sheet, Workbook};
use crate::catalog::group_rows;
use crate::record::{AffectedItem, Assessment, ChangeRecord, ComplexityScores, TrackType};

pub const INSTRUCTIONS: &str = "Instructions";
pub const SCOPE_OF_CHANGE: &str = "Scope of Change";
pub const FULL_VS_FAST_TRACK: &str = "Full vs Fast Track";
pub const CRB_CIB: &str = "CRB-CIB";
pub const PRODUCT_ECA: &str = "Product ECA";
pub const AFFECTED_ITEMS: &str = "Affected Items";
pub const IMPACT_ANALYSIS: &str = "Impact Analysis";
pub const MANUFACTURING_QSR_ECA: &str = "Manufacturing-QSR ECA";
pub const MINIMUM_DELIVERABLES: &str = "Minimum Deliverables";

/// Reference documents listed on the instructions sheet by default.
pub const DEFAULT_REFERENCE_DOCUMENTS: [&str; 2] = [
    "D-0000916903: ECA Requirements and Additional Details",
    "D-0001048589: Object Types Reference",
];

/// Header row of the deliverables sheet.
pub const DELIVERABLES_HEADER: [&str; 4] = ["Deliverable", "Responsible", "Due Date", "Status"];

const ECA_TABLE_HEADER: [&str; 6] = [
    "Sub-Function",
    "Affected",
    "Impact",
    "ECA Team Member",
    "Impact Analysis",
    "Comment/Justification",
];

/// Sheet names a record exports to, in order.
pub fn export_tab_names(record: &ChangeRecord) -> Vec<&'static str> {
    let mut names = vec![INSTRUCTIONS, SCOPE_OF_CHANGE, FULL_VS_FAST_TRACK];
    if record.is_full_track() {
        names.push(CRB_CIB);
    }
    if record.is_product() {
        names.extend([PRODUCT_ECA, AFFECTED_ITEMS, IMPACT_ANALYSIS]);
    }
    if record.is_manufacturing() {
        names.push(MANUFACTURING_QSR_ECA);
    }
    names.push(MINIMUM_DELIVERABLES);
    names
}

/// Project a record with the default reference documents.
pub fn project(record: &ChangeRecord) -> Workbook {
    Projector::default().project(record)
}

/// Builds workbooks from records.
#[derive(Debug, Clone)]
pub struct Projector {
    reference_documents: Vec<String>,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            reference_documents: DEFAULT_REFERENCE_DOCUMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Projector {
    /// A projector listing these reference documents. An empty list keeps the defaults.
    pub fn new(reference_documents: Vec<String>) -> Self {
        if reference_documents.is_empty() {
            Self::default()
        } else {
            Self {
                reference_documents,
            }
        }
    }

    /// Build the workbook for a record. Partially complete records are fine.
    pub fn project(&self, record: &ChangeRecord) -> Workbook {
        let mut sheets = vec![
            self.instructions(),
            scope_of_change(record),
            full_vs_fast_track(record),
        ];

        if record.is_full_track() {
            sheets.push(crb_cib(record));
        }

        if record.is_product() {
            sheets.push(product_eca(record));
            sheets.push(affected_items(record));
            sheets.push(impact_analysis(record));
        }

        if record.is_manufacturing() {
            sheets.push(manufacturing_eca(record));
        }

        sheets.push(minimum_deliverables());

        Workbook { sheets }
    }

    fn instructions(&self) -> Sheet {
        let mut sheet = Sheet::new(INSTRUCTIONS, "General ECA Instructions");
        sheet
            .blank()
            .line("The instructions on this tab are for guidance when filling out an ECA. Always reference D-0000916903 for ECA requirements and additional details.")
            .line("These instructions are for the Change Leader (CL) to follow with the help of the identified ECA team.")
            .blank()
            .line("Steps:")
            .line("1. Using the information below, determine which ECA type is required based on the types of Resulting Objects impacted by the change.")
            .line("2. Complete the Scope of Change tab.")
            .line("3. Complete the Full vs. Fast Track tab.")
            .line("4. Complete the CRB-CIB tab (Full-Track changes only).")
            .line("5. Complete the applicable ECA tab(s).")
            .line("6. The Minimum Deliverables (CIP) tab is optional for all ECAs but is recommended to supplement the Product ECA.")
            .line("7. When the ECA is completed, delete this tab and any other unused ECA tabs.")
            .line("8. In Windchill: Upload the ECA to the ECR's Attachments section and complete the 'Analyze Change Request' task for the ECR.")
            .blank()
            .line("Reference Documents:");
        for document in &self.reference_documents {
            sheet.line(format!("• {}", document));
        }
        sheet
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn scope_of_change(record: &ChangeRecord) -> Sheet {
    let required = record
        .required_eca_types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut sheet = Sheet::new(SCOPE_OF_CHANGE, "Scope of Change");
    sheet
        .blank()
        .pair("ECR Number:", record.ecr_number.as_str())
        .pair(
            "Change Type:",
            record.change_type.map(|c| c.label()).unwrap_or_default(),
        )
        .pair("Object Type:", record.object_type.as_str())
        .pair("Document Number:", record.document_number.as_str())
        .pair("Document Type:", record.document_type.as_str())
        .pair("Version:", record.document_version.as_str())
        .pair("State:", record.document_state.as_str())
        .pair("Required ECA Types:", required)
        .blank()
        .line("Scope and Reason for Change:")
        .line(record.scope_of_change.as_str())
        .blank()
        .line("Summary of Change:")
        .line(record.change_summary.as_str());
    sheet
}

fn full_vs_fast_track(record: &ChangeRecord) -> Sheet {
    let mut sheet = Sheet::new(FULL_VS_FAST_TRACK, "Full vs Fast Track");
    sheet.blank();

    if let Some(scores) = record.complexity_scores {
        for (criterion, value) in ComplexityScores::CRITERIA
            .iter()
            .zip([scores.impact(), scores.risk(), scores.cost()])
        {
            sheet.pair(&format!("{} Score:", capitalize(criterion)), value);
        }
        sheet.pair(
            "Total Complexity Score:",
            record.total_complexity_score.unwrap_or_else(|| scores.total()),
        );
    }

    let routing = record.track_type.unwrap_or(TrackType::Fast);
    sheet
        .pair("Routing Type:", routing.label())
        .pair("Rationale:", record.complexity_rationale.as_str())
        .blank();

    if record.is_full_track() {
        sheet.line("CRB Members:").line(record.crb_members.as_str());
    } else {
        sheet.line("CRB review is not required for Fast Track changes.");
    }
    sheet
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn crb_cib(record: &ChangeRecord) -> Sheet {
    let notes = if record.approval_notes.trim().is_empty() {
        "This tab should be completed with detailed CRB member information and review requirements."
    } else {
        record.approval_notes.as_str()
    };

    let mut sheet = Sheet::new(CRB_CIB, "CRB-CIB");
    sheet
        .blank()
        .line("Change Review Board Members:")
        .line(record.crb_members.as_str())
        .blank()
        .line("Change Implementation Board Members:")
        .line(record.cib_members.as_str())
        .blank()
        .line("Notes:")
        .line(notes);
    sheet
}

fn product_eca(record: &ChangeRecord) -> Sheet {
    let options = record.product_type_options.unwrap_or_default();

    let mut sheet = Sheet::new(PRODUCT_ECA, "Product ECA");
    sheet
        .blank()
        .line("Product Change Criteria:")
        .pair("Includes Part Objects:", yes_no(options.includes_part_objects))
        .pair(
            "Includes Product Design Datasets:",
            yes_no(options.includes_product_design_datasets),
        )
        .pair(
            "Includes Protocol/Report:",
            yes_no(options.includes_protocol_report),
        )
        .blank()
        .line("Instructions:")
        .line("1. Export the \"Structure\" report (Children of the source)")
        .line("2. Export the \"Where Used\" report (where this source is used)")
        .line("3. Combine the exports into the Affected Items tab")
        .line("4. Complete the Impact Analysis tab");

    if let Some(eca) = &record.product_eca_data {
        sheet
            .blank()
            .pair("Affected Products (End Items):", eca.affected_products.as_str())
            .blank()
            .row(ECA_TABLE_HEADER);

        for function in group_rows(&eca.rows) {
            sheet.line(function.name);
            for sub in &function.sub_functions {
                for row in &sub.rows {
                    sheet.row([
                        Cell::text(sub.name),
                        Cell::text(row.affected.map(|a| a.label()).unwrap_or_default()),
                        Cell::text(row.impact.map(|i| i.label()).unwrap_or_default()),
                        Cell::text(row.eca_team_member.as_str()),
                        Cell::text(row.impact_analysis.as_str()),
                        Cell::text(row.justification.as_str()),
                    ]);
                }
            }
        }
    }

    if let Some(qsr) = record.qsr_assessment.as_ref().filter(|_| record.needs_qsr()) {
        sheet.blank().line("QSR Assessment:").blank();
        push_assessment_blocks(&mut sheet, &qsr.assessments);
    }

    sheet
}

fn affected_items(record: &ChangeRecord) -> Sheet {
    let mut sheet = Sheet::new(AFFECTED_ITEMS, "Affected Items");
    sheet.blank().row(AffectedItem::COLUMNS);
    if let Some(data) = &record.product_data {
        for item in &data.affected_items {
            sheet.row(item.values());
        }
    }
    sheet
}

fn impact_analysis(record: &ChangeRecord) -> Sheet {
    let narrative = record
        .product_data
        .as_ref()
        .map(|d| d.impact_analysis.as_str())
        .unwrap_or_default();
    let products = record
        .product_eca_data
        .as_ref()
        .map(|d| d.affected_products.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("List affected end items here...");

    let mut sheet = Sheet::new(IMPACT_ANALYSIS, "Impact Analysis");
    sheet
        .blank()
        .line("Overall Impact Assessment:")
        .line(narrative)
        .blank()
        .line("Affected Products (End Items):")
        .line(products);
    sheet
}

fn manufacturing_eca(record: &ChangeRecord) -> Sheet {
    let data = record
        .manufacturing_data
        .clone()
        .filter(|_| record.has_manufacturing_branch())
        .unwrap_or_default();

    let mut sheet = Sheet::new(MANUFACTURING_QSR_ECA, "Manufacturing/QSR ECA");
    sheet
        .blank()
        .pair("Impacted Objects:", data.impacted_objects.as_str())
        .pair("ECR Number:", record.ecr_number.as_str())
        .blank()
        .line("Team Members:")
        .pair("Change Initiator:", data.change_initiator.as_str())
        .pair("Change Leader:", data.change_leader.as_str())
        .pair("Implementation Lead:", data.implementation_lead.as_str())
        .pair("SMEs:", data.smes.as_str())
        .blank()
        .line("Impact Assessment:")
        .blank();

    if let Some(qsr) = record.qsr_assessment.as_ref().filter(|_| record.needs_qsr()) {
        push_assessment_blocks(&mut sheet, &qsr.assessments);
    }
    push_assessment_blocks(&mut sheet, &data.assessments);
    sheet
}

/// One vertical block per question, followed by a blank row.
fn push_assessment_blocks(sheet: &mut Sheet, assessments: &[Assessment]) {
    for assessment in assessments {
        sheet.line(assessment.question.as_str()).pair(
            "Answer:",
            assessment.answer.map(|a| a.label()).unwrap_or_default(),
        );
        if assessment.answer == Some(crate::record::Answer::No)
            && !assessment.no_reason.trim().is_empty()
        {
            sheet.pair("Reason for No:", assessment.no_reason.as_str());
        }
        if !assessment.justification.trim().is_empty() {
            sheet.pair("Comment/Justification:", assessment.justification.as_str());
        }
        sheet.blank();
    }
}

fn minimum_deliverables() -> Sheet {
    // Free-text deliverables stay out of the grid; the body is a blank row.
    let mut sheet = Sheet::new(MINIMUM_DELIVERABLES, "Minimum Deliverables (CIP)");
    sheet
        .blank()
        .line("This tab is optional but recommended to supplement the ECA.")
        .line("Use it for project organization or as an overflow document list.")
        .blank()
        .row(DELIVERABLES_HEADER)
        .row([Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]);
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        Answer, AssessmentSet, ChangeType, ManufacturingData, ManufacturingDetermination,
        ProductData, ProductEcaData, ProductTypeOptions, QsrDetermination,
    };

    fn scored(total: (u8, u8, u8)) -> ChangeRecord {
        let scores = ComplexityScores::new(total.0, total.1, total.2).unwrap();
        ChangeRecord {
            ecr_number: "ECR-1".into(),
            complexity_scores: Some(scores),
            total_complexity_score: Some(scores.total()),
            track_type: Some(scores.track_type()),
            crb_members: "A. Board".into(),
            ..Default::default()
        }
    }

    #[test]
    fn fast_track_has_no_crb_sheet() {
        let workbook = project(&scored((1, 1, 1)));
        assert!(workbook.sheet(CRB_CIB).is_none());
        let track = workbook.sheet(FULL_VS_FAST_TRACK).unwrap();
        assert!(track.contains_text("CRB review is not required for Fast Track changes."));
        assert!(track.contains_text("Fast Track"));
    }

    #[test]
    fn full_track_has_crb_sheet() {
        let workbook = project(&scored((3, 3, 1)));
        assert!(workbook.sheet(CRB_CIB).is_some());
        let track = workbook.sheet(FULL_VS_FAST_TRACK).unwrap();
        assert!(track.contains_text("CRB Members:"));
        assert!(track.contains_text("A. Board"));
        assert!(track.rows.iter().any(|r| r.get(1) == Some(&Cell::Number(7))));
    }

    #[test]
    fn minimal_record_sheet_order() {
        let workbook = project(&ChangeRecord::default());
        assert_eq!(
            workbook.sheet_names(),
            [INSTRUCTIONS, SCOPE_OF_CHANGE, FULL_VS_FAST_TRACK, MINIMUM_DELIVERABLES]
        );
    }

    #[test]
    fn tab_names_match_projection() {
        let mut record = scored((3, 3, 3));
        record.change_type = Some(ChangeType::Product);
        assert_eq!(export_tab_names(&record), project(&record).sheet_names());

        record.change_type = Some(ChangeType::Manufacturing);
        assert_eq!(export_tab_names(&record), project(&record).sheet_names());
    }

    #[test]
    fn product_sheets() {
        let record = ChangeRecord {
            change_type: Some(ChangeType::Product),
            product_type_options: Some(ProductTypeOptions {
                includes_part_objects: true,
                ..Default::default()
            }),
            product_data: Some(ProductData {
                affected_items: vec![AffectedItem {
                    part_number: "P-1".into(),
                    ..Default::default()
                }],
                impact_analysis: "Minor fit change".into(),
            }),
            ..Default::default()
        };
        let workbook = project(&record);

        let eca = workbook.sheet(PRODUCT_ECA).unwrap();
        assert_eq!(eca.rows[3], vec![Cell::text("Includes Part Objects:"), Cell::text("Yes")]);

        let items = workbook.sheet(AFFECTED_ITEMS).unwrap();
        assert_eq!(items.rows[2].len(), AffectedItem::COLUMNS.len());
        assert_eq!(items.rows[3][0], Cell::text("P-1"));

        let impact = workbook.sheet(IMPACT_ANALYSIS).unwrap();
        assert!(impact.contains_text("Minor fit change"));
        assert!(impact.contains_text("List affected end items here..."));
        assert!(workbook.sheet(MANUFACTURING_QSR_ECA).is_none());
    }

    #[test]
    fn product_eca_table_is_grouped() {
        let catalog = crate::catalog::Catalog::load().unwrap();
        let record = ChangeRecord {
            change_type: Some(ChangeType::Product),
            product_eca_data: Some(ProductEcaData {
                affected_products: "End item X".into(),
                rows: catalog.seed_eca_rows(),
            }),
            ..Default::default()
        };
        let eca = project(&record).sheet(PRODUCT_ECA).cloned().unwrap();
        assert!(eca.contains_text("Program Management"));
        assert!(eca.contains_text("Regulatory"));
        assert!(eca.contains_text("End item X"));
    }

    fn training_qsr() -> QsrDetermination {
        let mut qsr = QsrDetermination::default();
        qsr.set_includes_training_documents(true);
        qsr
    }

    fn em_branch() -> ManufacturingDetermination {
        let mut mfg = ManufacturingDetermination::default();
        mfg.set_includes_mfg_datasets_em(true);
        mfg
    }

    #[test]
    fn answers_for_inactive_branches_are_not_exported() {
        let mut answered = Assessment::new("training", "Training needed?");
        answered.set_answer(Some(Answer::Yes));
        let record = ChangeRecord {
            change_type: Some(ChangeType::Manufacturing),
            qsr_determination: Some(QsrDetermination::none_of_above()),
            manufacturing_determination: Some(ManufacturingDetermination::default()),
            qsr_assessment: Some(AssessmentSet {
                assessments: vec![answered.clone()],
            }),
            manufacturing_data: Some(ManufacturingData {
                change_leader: "Lee".into(),
                assessments: vec![answered],
                ..Default::default()
            }),
            ..Default::default()
        };

        let sheet = project(&record)
            .sheet(MANUFACTURING_QSR_ECA)
            .cloned()
            .unwrap();
        assert!(!sheet.contains_text("Training needed?"));
        assert!(!sheet.contains_text("Lee"));
    }

    #[test]
    fn manufacturing_blocks_are_vertical() {
        let mut no = Assessment::new("safety", "Safety implications?");
        no.set_answer(Some(Answer::No));
        no.no_reason = "Not applicable to this change".into();
        let mut yes = Assessment::new("design", "Design affected?");
        yes.set_answer(Some(Answer::Yes));
        yes.justification = "New tooling".into();

        let record = ChangeRecord {
            change_type: Some(ChangeType::Manufacturing),
            qsr_determination: Some(training_qsr()),
            manufacturing_determination: Some(em_branch()),
            qsr_assessment: Some(AssessmentSet {
                assessments: vec![Assessment::new("training", "Training needed?")],
            }),
            manufacturing_data: Some(ManufacturingData {
                change_leader: "Lee".into(),
                assessments: vec![yes, no],
                ..Default::default()
            }),
            ..Default::default()
        };
        let workbook = project(&record);
        let sheet = workbook.sheet(MANUFACTURING_QSR_ECA).unwrap();

        let start = sheet
            .rows
            .iter()
            .position(|r| r[0] == Cell::text("Training needed?"))
            .unwrap();
        let rows = &sheet.rows[start..];
        assert_eq!(rows[1], vec![Cell::text("Answer:"), Cell::Empty]);
        assert_eq!(rows[2], vec![Cell::Empty]);
        assert_eq!(rows[3], vec![Cell::text("Design affected?")]);
        assert_eq!(rows[4], vec![Cell::text("Answer:"), Cell::text("Yes")]);
        assert_eq!(
            rows[5],
            vec![Cell::text("Comment/Justification:"), Cell::text("New tooling")]
        );
        assert_eq!(rows[6], vec![Cell::Empty]);
        assert_eq!(rows[7], vec![Cell::text("Safety implications?")]);
        assert_eq!(rows[8], vec![Cell::text("Answer:"), Cell::text("No")]);
        assert_eq!(
            rows[9],
            vec![
                Cell::text("Reason for No:"),
                Cell::text("Not applicable to this change")
            ]
        );
        assert!(workbook.sheet(PRODUCT_ECA).is_none());
    }

    #[test]
    fn deliverables_sheet_has_header_and_empty_body() {
        let record = ChangeRecord {
            minimum_deliverables: "Updated drawings".into(),
            ..Default::default()
        };
        let workbook = project(&record);
        let sheet = workbook.sheets.last().unwrap();
        assert_eq!(sheet.name, MINIMUM_DELIVERABLES);
        let n = sheet.rows.len();
        assert_eq!(sheet.rows[n - 2], DELIVERABLES_HEADER.map(Cell::text).to_vec());
        assert!(sheet.rows[n - 1].iter().all(|c| *c == Cell::Empty));
        assert!(!sheet.contains_text("Updated drawings"));
    }

    #[test]
    fn custom_reference_documents() {
        let projector = Projector::new(vec!["D-1: Local guide".into()]);
        let workbook = projector.project(&ChangeRecord::default());
        let sheet = workbook.sheet(INSTRUCTIONS).unwrap();
        assert!(sheet.contains_text("• D-1: Local guide"));
        assert!(!sheet.contains_text("• D-0001048589: Object Types Reference"));
    }
}
