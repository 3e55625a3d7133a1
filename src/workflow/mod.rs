//! Wizard step sequencing.
//!
//! - [`step`] - the [`StepId`] enum and its canonical order
//! - [`sequencer`] - step list computation and navigation
//! - [`session`] - [`WizardSession`], the record plus its navigation state

pub mod sequencer;
pub mod session;
pub mod step;

pub use sequencer::{compute_steps, current_index, next_step, previous_step, resolve_current};
pub use session::WizardSession;
pub use step::StepId;
