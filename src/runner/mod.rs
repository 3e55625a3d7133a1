//! Interactive wizard orchestration.

pub mod wizard;

pub use wizard::{RunOptions, WizardOutcome, WizardRunner, MAX_EXPORT_ATTEMPTS};
