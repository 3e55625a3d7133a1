//! Partial updates and the record accumulator.
//!
//! Steps never mutate the record directly. Each produces a [`RecordUpdate`]
//! naming only the fields it owns, and the accumulator merges it in:
//! top-level fields are overwritten, nested groups are replaced whole, and
//! fields the update leaves as `None` are untouched.

use tracing::debug;

use super::complexity::{ComplexityScores, TrackType};
use super::determination::{ManufacturingDetermination, QsrDetermination};
use super::schema::{
    AssessmentSet, ChangeRecord, ChangeType, EcaType, ManufacturingData, ProductData,
    ProductEcaData, ProductTypeOptions,
};

/// A partial change record.
///
/// Optional groups use `Option<Option<_>>`: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub ecr_number: Option<String>,
    pub document_number: Option<String>,
    pub document_type: Option<String>,
    pub document_version: Option<String>,
    pub document_state: Option<String>,
    pub object_type: Option<String>,
    pub change_type: Option<Option<ChangeType>>,
    pub qsr_determination: Option<Option<QsrDetermination>>,
    pub product_type_options: Option<Option<ProductTypeOptions>>,
    pub manufacturing_determination: Option<Option<ManufacturingDetermination>>,
    pub required_eca_types: Option<Vec<EcaType>>,
    pub scope_of_change: Option<String>,
    pub change_summary: Option<String>,
    pub complexity_scores: Option<Option<ComplexityScores>>,
    pub total_complexity_score: Option<Option<u8>>,
    pub track_type: Option<Option<TrackType>>,
    pub complexity_rationale: Option<String>,
    pub crb_members: Option<String>,
    pub cib_members: Option<String>,
    pub approval_notes: Option<String>,
    pub product_data: Option<Option<ProductData>>,
    pub product_eca_data: Option<Option<ProductEcaData>>,
    pub qsr_assessment: Option<Option<AssessmentSet>>,
    pub manufacturing_data: Option<Option<ManufacturingData>>,
    pub minimum_deliverables: Option<String>,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ecr_number(mut self, value: impl Into<String>) -> Self {
        self.ecr_number = Some(value.into());
        self
    }

    pub fn document_number(mut self, value: impl Into<String>) -> Self {
        self.document_number = Some(value.into());
        self
    }

    pub fn change_type(mut self, value: ChangeType) -> Self {
        self.change_type = Some(Some(value));
        self
    }

    pub fn qsr_determination(mut self, value: QsrDetermination) -> Self {
        self.qsr_determination = Some(Some(value));
        self
    }

    pub fn manufacturing_determination(mut self, value: ManufacturingDetermination) -> Self {
        self.manufacturing_determination = Some(Some(value));
        self
    }

    /// Set the scores along with their derived total and track.
    pub fn complexity(mut self, scores: ComplexityScores) -> Self {
        self.complexity_scores = Some(Some(scores));
        self.total_complexity_score = Some(Some(scores.total()));
        self.track_type = Some(Some(scores.track_type()));
        self
    }

    /// Clear the branch groups whose steps are no longer active.
    pub fn clear_inactive_branches(
        mut self,
        qsr: bool,
        product: bool,
        manufacturing: bool,
    ) -> Self {
        if !qsr {
            self.qsr_assessment = Some(None);
        }
        if !product {
            self.product_data = Some(None);
            self.product_eca_data = Some(None);
        }
        if !manufacturing {
            self.manufacturing_data = Some(None);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

macro_rules! merge_fields {
    ($record:expr, $update:expr, $touched:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $update.$field {
                $record.$field = value;
                $touched.push(stringify!($field));
            }
        )+
    };
}

/// Owns the change record and applies partial updates to it.
#[derive(Debug, Clone, Default)]
pub struct ChangeRecordAccumulator {
    record: ChangeRecord,
}

impl ChangeRecordAccumulator {
    /// Start from an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record.
    pub fn from_record(record: ChangeRecord) -> Self {
        Self { record }
    }

    /// Merge a partial update and return the new record.
    ///
    /// No validation happens here; gating is the step forms' job.
    pub fn merge(&mut self, update: RecordUpdate) -> &ChangeRecord {
        let mut touched: Vec<&'static str> = Vec::new();
        merge_fields!(self.record, update, touched;
            ecr_number,
            document_number,
            document_type,
            document_version,
            document_state,
            object_type,
            change_type,
            qsr_determination,
            product_type_options,
            manufacturing_determination,
            required_eca_types,
            scope_of_change,
            change_summary,
            complexity_scores,
            total_complexity_score,
            track_type,
            complexity_rationale,
            crb_members,
            cib_members,
            approval_notes,
            product_data,
            product_eca_data,
            qsr_assessment,
            manufacturing_data,
            minimum_deliverables,
        );
        debug!(fields = ?touched, "Merged record update");
        &self.record
    }

    pub fn record(&self) -> &ChangeRecord {
        &self.record
    }

    pub fn into_record(self) -> ChangeRecord {
        self.record
    }
}
