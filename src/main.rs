//! eca CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eca_wizard::cli::{Cli, CommandDispatcher};
use eca_wizard::config::{find_project_root, load_config};
use eca_wizard::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("eca_wizard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eca_wizard=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// `--project` when given, else the nearest directory holding `.eca` or
/// `.git`, else the current directory.
fn project_root(cli: &Cli) -> PathBuf {
    if let Some(project) = &cli.project {
        return project.clone();
    }
    let cwd = std::env::current_dir().unwrap_or_default();
    find_project_root(&cwd).unwrap_or(cwd)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("eca starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = project_root(&cli);

    let config = match load_config(&project_root) {
        Ok(config) => config,
        Err(e) => {
            let mode = OutputMode::from_flags(cli.verbose, cli.quiet, OutputMode::Normal);
            create_ui(false, mode).error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let output_mode =
        OutputMode::from_flags(cli.verbose, cli.quiet, config.settings.default_output);
    let mut ui = create_ui(cli.wants_prompts(), output_mode);

    let dispatcher = CommandDispatcher::new(project_root, config);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
