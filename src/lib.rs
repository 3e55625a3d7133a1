//! eca - Guided engineering change assessment.
//!
//! Walks an engineer through classifying an Engineering Change Request,
//! scoring its complexity and completing the assessments that apply, then
//! exports the accumulated record as a set of sheets.
//!
//! # Modules
//!
//! - [`catalog`] - Embedded question sets, Product ECA rows and choice lists
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`export`] - Projection of a record onto sheets, and sheet writers
//! - [`record`] - The change record and its accumulator
//! - [`runner`] - The interactive wizard loop
//! - [`steps`] - One form per wizard step
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`workflow`] - Step identifiers and the step sequencer
//!
//! # Example
//!
//! ```
//! use eca_wizard::record::{ChangeRecordAccumulator, ChangeType, ComplexityScores, RecordUpdate};
//! use eca_wizard::workflow::{compute_steps, StepId};
//!
//! let mut acc = ChangeRecordAccumulator::new();
//! acc.merge(
//!     RecordUpdate::new()
//!         .change_type(ChangeType::Product)
//!         .complexity(ComplexityScores::new(3, 2, 2).unwrap()),
//! );
//!
//! let steps = compute_steps(acc.record());
//! assert!(steps.contains(&StepId::Crb));
//! assert_eq!(steps.last(), Some(&StepId::Review));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod record;
pub mod runner;
pub mod steps;
pub mod ui;
pub mod workflow;

pub use error::{EcaError, Result};
