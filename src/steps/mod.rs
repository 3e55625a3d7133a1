//! Wizard step forms.
//!
//! Each step of the wizard is a form that owns its local field values:
//!
//! - [`StepForm::from_record`] pre-fills the form from the record, so going
//!   back to a step shows the answers already given
//! - [`StepForm::collect`] prompts for the fields
//! - [`StepForm::is_valid`] / [`StepForm::problems`] gate continuing
//! - [`StepForm::to_update`] produces the partial update for the record
//!
//! Prompt keys are `<step>.<field>`, so any prompt can be answered in
//! non-interactive runs with an `ECA_PROMPT_<STEP>_<FIELD>` variable.
//!
//! # Example
//!
//! ```
//! use eca_wizard::catalog::Catalog;
//! use eca_wizard::record::ChangeRecord;
//! use eca_wizard::steps::build_form;
//! use eca_wizard::ui::MockUI;
//! use eca_wizard::workflow::StepId;
//!
//! let catalog = Catalog::load().unwrap();
//! let record = ChangeRecord::new();
//! let mut form = build_form(StepId::Scope, &record, &catalog);
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("scope.scope", "Replace the housing gasket");
//! ui.set_prompt_response("scope.summary", "New supplier material");
//! form.collect(&mut ui).unwrap();
//!
//! assert!(form.is_valid());
//! ```

pub mod assessment;
pub mod crb;
pub mod deliverables;
mod fields;
pub mod product;
pub mod review;
pub mod scope;
pub mod search;
pub mod track;

pub use assessment::{ManufacturingForm, QsrForm};
pub use crb::CrbForm;
pub use deliverables::DeliverablesForm;
pub use product::{AffectedItemsForm, ProductEcaForm};
pub use review::ReviewForm;
pub use scope::ScopeForm;
pub use search::SearchForm;
pub use track::TrackForm;

use crate::catalog::{Catalog, QuestionSet};
use crate::error::Result;
use crate::record::{ChangeRecord, RecordUpdate};
use crate::ui::UserInterface;
use crate::workflow::StepId;

/// A single wizard step's form.
pub trait StepForm {
    /// The step this form belongs to.
    fn id(&self) -> StepId;

    /// Prompt for the form's fields.
    fn collect(&mut self, ui: &mut dyn UserInterface) -> Result<()>;

    /// Reasons the step cannot be continued yet. Empty when valid.
    fn problems(&self) -> Vec<String>;

    /// Whether the step may be continued.
    fn is_valid(&self) -> bool {
        self.problems().is_empty()
    }

    /// The partial record update this form produces.
    fn to_update(&self) -> RecordUpdate;
}

/// Build the form for a step, pre-filled from the record.
pub fn build_form(step: StepId, record: &ChangeRecord, catalog: &Catalog) -> Box<dyn StepForm> {
    match step {
        StepId::Search => Box::new(SearchForm::from_record(record, catalog)),
        StepId::Scope => Box::new(ScopeForm::from_record(record)),
        StepId::Track => Box::new(TrackForm::from_record(record)),
        StepId::Qsr => Box::new(QsrForm::from_record(record, catalog)),
        StepId::ProductAffected => Box::new(AffectedItemsForm::from_record(record, catalog)),
        StepId::ProductEca => Box::new(ProductEcaForm::from_record(record, catalog)),
        StepId::Em => Box::new(ManufacturingForm::from_record(
            record,
            catalog,
            QuestionSet::Em,
        )),
        StepId::Sd => Box::new(ManufacturingForm::from_record(
            record,
            catalog,
            QuestionSet::Sd,
        )),
        StepId::Crb => Box::new(CrbForm::from_record(record)),
        StepId::Deliverables => Box::new(DeliverablesForm::from_record(record)),
        StepId::Review => Box::new(ReviewForm::from_record(record)),
    }
}
