//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::runner::RunSummary;

use super::icons::{failure_detail, StatusKind};
use super::progress::{format_duration, format_tally};
use super::{
    NonInteractiveUI, OutputMode, ProgressSpinner, ShipcheckTheme, SpinnerHandle, UserInterface,
    FAILURE_BANNER, SUCCESS_BANNER,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    err: Term,
    theme: ShipcheckTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            err: Term::stderr(),
            theme: ShipcheckTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "{}",
                self.theme.dim.apply_to(format!("[{}/{}]", current, total))
            )
            .ok();
        }
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "  {} {}",
                self.theme.dim.apply_to("$"),
                self.theme.command.apply_to(command)
            )
            .ok();
        }
    }

    fn show_command_output(&mut self, stdout: &str, stderr: &str) {
        let b = &self.theme.border;
        for line in stdout.lines() {
            writeln!(self.term, "    {} {}", b.apply_to("│"), line).ok();
        }
        for line in stderr.lines() {
            writeln!(
                self.err,
                "    {} {}",
                b.apply_to("│"),
                self.theme.warning.apply_to(line)
            )
            .ok();
        }
    }

    fn show_run_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        let b = &self.theme.border;

        writeln!(self.term).ok();
        writeln!(
            self.term,
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        )
        .ok();

        for result in &summary.results {
            let kind = StatusKind::from(&result.status);
            let right_side = match failure_detail(&result.status) {
                Some(detail) => self.theme.error.apply_to(detail).to_string(),
                None => self
                    .theme
                    .duration
                    .apply_to(format_duration(result.duration))
                    .to_string(),
            };

            writeln!(
                self.term,
                "  {} {} {:<4} {:<20} {}",
                b.apply_to("│"),
                kind.styled(&self.theme),
                kind.label(),
                result.name,
                right_side,
            )
            .ok();
        }

        writeln!(
            self.term,
            "  {}",
            b.apply_to("├────────────────────────────────────")
        )
        .ok();
        writeln!(
            self.term,
            "  {} {} {} {}",
            b.apply_to("│"),
            format_tally(summary.passed(), summary.total()),
            self.theme.dim.apply_to("·"),
            self.theme
                .duration
                .apply_to(format_duration(summary.total_duration)),
        )
        .ok();
        writeln!(
            self.term,
            "  {}",
            b.apply_to("└────────────────────────────────────")
        )
        .ok();
        writeln!(self.term).ok();

        if summary.all_passed() {
            writeln!(self.term, "{}", self.theme.format_success(SUCCESS_BANNER)).ok();
        } else {
            writeln!(self.term, "{}", self.theme.format_error(FAILURE_BANNER)).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
