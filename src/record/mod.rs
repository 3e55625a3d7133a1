//! The change record and the accumulator that builds it.
//!
//! - [`schema`] - the [`ChangeRecord`] aggregate and its field groups
//! - [`determination`] - QSR and manufacturing flag groups with their exclusion rules
//! - [`complexity`] - complexity scores and track routing
//! - [`accumulator`] - partial updates and shallow merging
//! - [`loader`] - reading records from YAML/JSON files

pub mod accumulator;
pub mod complexity;
pub mod determination;
pub mod loader;
pub mod schema;

pub use accumulator::{ChangeRecordAccumulator, RecordUpdate};
pub use complexity::{score_label, ComplexityScores, TrackType, FULL_TRACK_THRESHOLD, SCORE_RANGE};
pub use determination::{required_eca_types, ManufacturingDetermination, QsrDetermination};
pub use loader::{load_record, parse_record};
pub use schema::{
    AffectedItem, Answer, Assessment, AssessmentSet, ChangeRecord, ChangeType, EcaRow, EcaType,
    ImpactLevel, ItemSource, ManufacturingData, ProductData, ProductEcaData, ProductTypeOptions,
};
