//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// eca - Guided engineering change assessment.
#[derive(Debug, Parser)]
#[command(name = "eca")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether the chosen command may prompt.
    pub fn wants_prompts(&self) -> bool {
        match &self.command {
            None => true,
            Some(Commands::Run(args)) => !args.non_interactive,
            Some(_) => false,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the assessment wizard (default if no command specified)
    Run(RunArgs),

    /// Show the step sequence for a change record
    Steps(StepsArgs),

    /// Export a change record without prompting
    Export(ExportArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Export format: xlsx, csv, json or yaml
    #[arg(short, long)]
    pub format: Option<String>,

    /// Directory the export is written into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Start from a saved change record (YAML or JSON)
    #[arg(short, long)]
    pub record: Option<PathBuf>,

    /// Use defaults and ECA_PROMPT_* variables, no prompts
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `steps` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StepsArgs {
    /// Change record file (YAML or JSON)
    #[arg(short, long)]
    pub record: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExportArgs {
    /// Change record file (YAML or JSON)
    #[arg(short, long)]
    pub record: PathBuf,

    /// Export format: xlsx, csv, json or yaml
    #[arg(short, long)]
    pub format: Option<String>,

    /// Directory the export is written into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Date stamped into the file name (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
