//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Exit codes are shared across commands:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Error (bad input, failed export, incomplete step) |
//! | 2 | Input file not found |
//! | 3 | Wizard closed without exporting |

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod export;
pub mod run;
pub mod steps;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, EXIT_ABANDONED, EXIT_ERROR, EXIT_MISSING_INPUT,
};
