//! Visual theme and styling.

use console::{Style, Term};

/// Styles for status lines written to the terminal.
#[derive(Debug, Clone)]
pub struct RelintTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Verbose per-file details.
    pub dim: Style,
}

impl Default for RelintTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RelintTheme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Theme without any styling, for pipes and `--no-color`.
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
        }
    }

    /// Pick [`new`](Self::new) or [`plain`](Self::plain).
    pub fn for_color(color: bool) -> Self {
        if color {
            Self::new()
        } else {
            Self::plain()
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
}

/// Whether `term` should receive ANSI colors.
///
/// `NO_COLOR` (<https://no-color.org/>) always wins.
pub fn colors_enabled(term: &Term) -> bool {
    std::env::var_os("NO_COLOR").is_none() && term.is_term()
}

/// Whether reports written to stdout should be colored.
pub fn should_use_colors() -> bool {
    colors_enabled(&Term::stdout())
}
