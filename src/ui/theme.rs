//! Styles for the wizard's terminal output.

use console::{Style, StyledObject, Term};

use super::StepBanner;

const DONE: char = '■';
const TODO: char = '□';

/// Styles used by [`TerminalUI`](super::TerminalUI) and the spinner.
#[derive(Debug, Clone)]
pub struct EcaTheme {
    success: Style,
    warning: Style,
    error: Style,
    dim: Style,
    title: Style,
    marker: Style,
}

impl Default for EcaTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl EcaTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            title: Style::new().bold(),
            marker: Style::new().bold().cyan(),
        }
    }

    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            title: Style::new(),
            marker: Style::new(),
        }
    }

    /// Colored only on a TTY, and never when `NO_COLOR` is set.
    pub fn for_term(term: &Term) -> Self {
        // https://no-color.org/
        if std::env::var_os("NO_COLOR").is_some() || !term.is_term() {
            Self::plain()
        } else {
            Self::new()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    /// Step banner: the title, then `Step n of m` over a track of done and
    /// remaining steps.
    ///
    /// ```text
    /// ◆ Product ECA
    ///   Step 3 of 7  ■■■□□□□
    /// ```
    pub fn format_step(&self, step: &StepBanner) -> String {
        format!(
            "{} {}\n  {}  {}",
            self.marker.apply_to("◆"),
            self.title.apply_to(&step.title),
            self.dim.apply_to(step.counter()),
            self.dim.apply_to(step_track(step)),
        )
    }

    /// Prefix for prompts asked while `step` is on screen, e.g. `3/7`.
    pub fn prompt_prefix(&self, step: &StepBanner) -> StyledObject<String> {
        self.dim.apply_to(step.short())
    }

    /// Key hint printed under a prompt.
    pub fn format_hint(&self, hint: &str) -> String {
        self.dim.apply_to(format!("  ({})", hint)).to_string()
    }
}

fn step_track(step: &StepBanner) -> String {
    let done = step.position.min(step.total);
    (0..step.total)
        .map(|i| if i < done { DONE } else { TODO })
        .collect()
}
