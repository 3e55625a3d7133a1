//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::EcaConfig;
use crate::error::{EcaError, Result};
use crate::export::ExportFormat;
use crate::record::{load_record, ChangeRecord};
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::config::ConfigCommand;
use super::export::ExportCommand;
use super::run::RunCommand;
use super::steps::StepsCommand;

/// Exit code for errors.
pub const EXIT_ERROR: i32 = 1;
/// Exit code when an input file does not exist.
pub const EXIT_MISSING_INPUT: i32 = 2;
/// Exit code when the wizard is closed without exporting.
pub const EXIT_ABANDONED: i32 = 3;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// Errors returned here are reported by `main` with exit code 1;
    /// commands that already told the user what went wrong return a
    /// failed [`CommandResult`] instead.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config: EcaConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher for a project and its resolved configuration.
    pub fn new(project_root: PathBuf, config: EcaConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        let config = &self.config;

        match &cli.command {
            Some(Commands::Run(args)) => {
                RunCommand::new(root, config.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Steps(args)) => StepsCommand::new(args.clone()).execute(ui),
            Some(Commands::Export(args)) => {
                ExportCommand::new(root, config.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Config(args)) => {
                ConfigCommand::new(root, config.clone(), args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => CompletionsCommand::new(args.clone()).execute(ui),
            None => RunCommand::new(root, config.clone(), RunArgs::default()).execute(ui),
        }
    }
}

/// Load a record file, reporting a missing file to the user.
///
/// `Ok(None)` means the file does not exist and the command should exit
/// with [`EXIT_MISSING_INPUT`].
pub(crate) fn read_record(
    ui: &mut dyn UserInterface,
    path: &Path,
) -> Result<Option<ChangeRecord>> {
    if !path.exists() {
        ui.error(&format!("Record file not found: {}", path.display()));
        return Ok(None);
    }
    load_record(path).map(Some)
}

/// Resolve the export format: the flag wins over the configured default.
pub(crate) fn resolve_format(flag: Option<&str>, configured: ExportFormat) -> Result<ExportFormat> {
    match flag {
        Some(raw) => raw
            .parse()
            .map_err(|message| EcaError::ConfigValidationError { message }),
        None => Ok(configured),
    }
}
