//! Terminal UI.

use console::Term;
use std::io::Write;

use super::theme::colors_enabled;
use super::{OutputMode, RelintTheme, UserInterface};

/// Terminal UI implementation.
///
/// Only reports and fixed text go to stdout. Status lines, warnings and
/// errors go to stderr so piped output stays parseable.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: RelintTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, color: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: RelintTheme::for_color(color),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", msg).ok();
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.err, "{}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_output() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn output(&mut self, text: &str) {
        if self.mode.shows_output() {
            write!(self.out, "{}", text).ok();
            self.out.flush().ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term()
    }
}

/// Create the terminal UI, honouring `--no-color` and `NO_COLOR`.
///
/// Status lines go to stderr, so color follows whether stderr is a terminal.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, !no_color && colors_enabled(&Term::stderr())))
}
