//! Change record structure.
//!
//! [`ChangeRecord`] is the single aggregate the wizard fills in. Every field
//! group is written by exactly one step; field names serialise in camelCase
//! so record files read the same as the exported summary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::complexity::{ComplexityScores, TrackType};
use super::determination::{required_eca_types, ManufacturingDetermination, QsrDetermination};

/// The accumulated engineering change record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangeRecord {
    /// Engineering Change Request number.
    pub ecr_number: String,
    pub document_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub document_state: String,
    /// Type of object being changed (Part, Drawing, SOP, ...).
    pub object_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
    #[serde(rename = "qsrDetermination", skip_serializing_if = "Option::is_none")]
    pub qsr_determination: Option<QsrDetermination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type_options: Option<ProductTypeOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_determination: Option<ManufacturingDetermination>,
    /// Derived when the first step finishes.
    #[serde(rename = "requiredECATypes", skip_serializing_if = "Vec::is_empty")]
    pub required_eca_types: Vec<EcaType>,

    pub scope_of_change: String,
    pub change_summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_scores: Option<ComplexityScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_complexity_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_type: Option<TrackType>,
    pub complexity_rationale: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub crb_members: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cib_members: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub approval_notes: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_data: Option<ProductData>,
    #[serde(rename = "productECAData", skip_serializing_if = "Option::is_none")]
    pub product_eca_data: Option<ProductEcaData>,
    #[serde(rename = "qsrAssessment", skip_serializing_if = "Option::is_none")]
    pub qsr_assessment: Option<AssessmentSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_data: Option<ManufacturingData>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub minimum_deliverables: String,
}

impl ChangeRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_product(&self) -> bool {
        self.change_type == Some(ChangeType::Product)
    }

    pub fn is_manufacturing(&self) -> bool {
        self.change_type == Some(ChangeType::Manufacturing)
    }

    /// Whether the QSR assessment branch applies.
    pub fn needs_qsr(&self) -> bool {
        self.qsr_determination
            .as_ref()
            .is_some_and(QsrDetermination::needs_qsr)
    }

    /// Whether the electro-mechanical manufacturing branch applies.
    pub fn needs_em(&self) -> bool {
        self.manufacturing_determination
            .as_ref()
            .is_some_and(ManufacturingDetermination::needs_em)
    }

    /// Whether the sterile-disposables manufacturing branch applies.
    pub fn needs_sd(&self) -> bool {
        self.manufacturing_determination
            .as_ref()
            .is_some_and(ManufacturingDetermination::needs_sd)
    }

    /// A manufacturing change with neither EM nor SD datasets selected.
    /// No manufacturing assessment step applies to it.
    pub fn lacks_manufacturing_branch(&self) -> bool {
        self.is_manufacturing() && !self.needs_em() && !self.needs_sd()
    }

    /// A manufacturing change with an EM or SD branch to assess.
    pub fn has_manufacturing_branch(&self) -> bool {
        self.is_manufacturing() && (self.needs_em() || self.needs_sd())
    }

    /// Groups still filled in although the steps that write them no longer
    /// apply, e.g. QSR answers after the QSR flags were unchecked.
    pub fn stale_branches(&self) -> Vec<&'static str> {
        let mut stale = Vec::new();
        if !self.needs_qsr() && self.qsr_assessment.is_some() {
            stale.push("qsrAssessment");
        }
        if !self.is_product() && self.product_data.is_some() {
            stale.push("productData");
        }
        if !self.is_product() && self.product_eca_data.is_some() {
            stale.push("productEcaData");
        }
        if !self.has_manufacturing_branch() && self.manufacturing_data.is_some() {
            stale.push("manufacturingData");
        }
        stale
    }

    /// Recompute the fields derived from scores and determinations, so a
    /// record read from a file can't disagree with itself.
    pub fn refresh_derived(&mut self) {
        if let Some(scores) = self.complexity_scores {
            self.total_complexity_score = Some(scores.total());
            self.track_type = Some(scores.track_type());
        }
        self.required_eca_types = required_eca_types(
            self.change_type,
            self.qsr_determination.as_ref(),
            self.manufacturing_determination.as_ref(),
        );
    }

    pub fn is_full_track(&self) -> bool {
        self.track_type == Some(TrackType::Full)
    }

    /// Identifier used in export file names: ECR number, then document
    /// number, then `Draft`.
    pub fn export_id(&self) -> &str {
        [self.ecr_number.trim(), self.document_number.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Draft")
    }
}

/// Product vs manufacturing classification. A change is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Product,
    Manufacturing,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Manufacturing => "manufacturing",
        }
    }

    /// Display label used in prompts and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Product => "Product Change",
            Self::Manufacturing => "Manufacturing/QSR Change",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "manufacturing" => Ok(Self::Manufacturing),
            _ => Err(format!("unknown change type: {}", s)),
        }
    }
}

/// Kind of assessment a change requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EcaType {
    #[serde(rename = "QSR")]
    Qsr,
    Product,
    #[serde(rename = "EM")]
    Em,
    #[serde(rename = "SD")]
    Sd,
}

impl EcaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qsr => "QSR",
            Self::Product => "Product",
            Self::Em => "EM",
            Self::Sd => "SD",
        }
    }
}

impl fmt::Display for EcaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criteria that make a change a product change. At least one must hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductTypeOptions {
    pub includes_part_objects: bool,
    pub includes_product_design_datasets: bool,
    pub includes_protocol_report: bool,
}

impl ProductTypeOptions {
    pub fn any(&self) -> bool {
        self.includes_part_objects
            || self.includes_product_design_datasets
            || self.includes_protocol_report
    }
}

/// Affected items and impact narrative for a product change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductData {
    pub affected_items: Vec<AffectedItem>,
    pub impact_analysis: String,
}

/// Where an affected item came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemSource {
    /// Children of the changed object.
    Structure,
    /// Parents that use the changed object.
    WhereUsed,
    #[default]
    Manual,
}

impl ItemSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::WhereUsed => "Where Used",
            Self::Manual => "Manual",
        }
    }
}

impl FromStr for ItemSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "-").as_str() {
            "structure" => Ok(Self::Structure),
            "where-used" => Ok(Self::WhereUsed),
            "manual" | "" => Ok(Self::Manual),
            _ => Err(format!("unknown item source: {}", s)),
        }
    }
}

/// One row of the affected-items list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AffectedItem {
    pub part_number: String,
    pub description: String,
    pub revision: String,
    pub object_type: String,
    pub state: String,
    pub source: ItemSource,
    /// Affected end item (top-level product) this part rolls up to.
    pub end_item: String,
    /// Action required (revise, obsolete, new, ...).
    pub action: String,
    pub disposition_in_stock: String,
    pub disposition_wip: String,
    pub disposition_finished_goods: String,
    pub disposition_in_field: String,
    pub cost: String,
    pub resource: String,
    pub time: String,
}

impl AffectedItem {
    /// Column headers, in export order.
    pub const COLUMNS: [&'static str; 15] = [
        "Part Number",
        "Description",
        "Revision",
        "Object Type",
        "State",
        "Source",
        "End Item",
        "Action Required",
        "In Stock",
        "WIP",
        "Finished Goods",
        "In Field",
        "Cost",
        "Resource",
        "Time",
    ];

    /// Cell values in [`Self::COLUMNS`] order.
    pub fn values(&self) -> [&str; 15] {
        [
            &self.part_number,
            &self.description,
            &self.revision,
            &self.object_type,
            &self.state,
            self.source.label(),
            &self.end_item,
            &self.action,
            &self.disposition_in_stock,
            &self.disposition_wip,
            &self.disposition_finished_goods,
            &self.disposition_in_field,
            &self.cost,
            &self.resource,
            &self.time,
        ]
    }
}

/// The product ECA assessment table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductEcaData {
    pub affected_products: String,
    pub rows: Vec<EcaRow>,
}

/// A yes/no answer. Unanswered is `None` at the use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl FromStr for Answer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Self::Yes),
            "no" | "n" | "false" => Ok(Self::No),
            _ => Err(format!("expected yes or no, got: {}", s)),
        }
    }
}

/// Impact level of an affected function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 4] = [Self::None, Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for ImpactLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown impact level: {}", s))
    }
}

/// One row of the product ECA table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EcaRow {
    pub id: String,
    pub affected_function: String,
    pub affected_sub_function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected: Option<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactLevel>,
    pub eca_team_member: String,
    /// The fixed question for this row.
    pub impact_analysis: String,
    pub justification: String,
}

/// A fixed yes/no assessment question and its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Answer>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub no_reason: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub justification: String,
}

impl Assessment {
    /// Create an unanswered assessment.
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            ..Default::default()
        }
    }

    /// Record an answer. Anything other than "no" clears the reason.
    pub fn set_answer(&mut self, answer: Option<Answer>) {
        self.answer = answer;
        if answer != Some(Answer::No) {
            self.no_reason.clear();
        }
    }

    /// Answered, and a "no" carries its reason.
    pub fn is_complete(&self) -> bool {
        match self.answer {
            Some(Answer::Yes) => true,
            Some(Answer::No) => !self.no_reason.trim().is_empty(),
            None => false,
        }
    }
}

/// Answers to the QSR question set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentSet {
    pub assessments: Vec<Assessment>,
}

/// Team and question answers for a manufacturing change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManufacturingData {
    pub impacted_objects: String,
    pub change_initiator: String,
    pub change_leader: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub implementation_lead: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub smes: String,
    pub assessments: Vec<Assessment>,
}
