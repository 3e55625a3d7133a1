//! Command-line interface for the assessment wizard.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, ConfigArgs, ExportArgs, RunArgs, StepsArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
