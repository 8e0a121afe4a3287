//! Non-interactive UI for CI/headless environments.

use crate::runner::RunSummary;

use super::icons::{failure_detail, StatusKind};
use super::progress::{format_duration, format_tally};
use super::{OutputMode, SpinnerHandle, UserInterface, FAILURE_BANNER, SUCCESS_BANNER};

/// Width of the `====` rules around headers.
const RULE_WIDTH: usize = 60;

/// UI implementation for non-interactive mode.
///
/// Writes plain, line-oriented output that reads well in CI logs: no
/// spinners, no colors, no cursor movement.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("[CHECK] {}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            let rule = "=".repeat(RULE_WIDTH);
            println!("\n{}\n{}\n{}", rule, title, rule);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            println!("\n[{}/{}]", current, total);
        }
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_status() {
            println!("$ {}", command);
        }
    }

    fn show_command_output(&mut self, stdout: &str, stderr: &str) {
        if !stdout.is_empty() {
            print!("{}", stdout);
            if !stdout.ends_with('\n') {
                println!();
            }
        }
        if !stderr.is_empty() {
            eprint!("{}", stderr);
            if !stderr.ends_with('\n') {
                eprintln!();
            }
        }
    }

    fn show_run_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        let rule = "=".repeat(RULE_WIDTH);
        println!("\n{}\nSUMMARY\n{}", rule, rule);

        for result in &summary.results {
            let line = StatusKind::from(&result.status).format_plain(&result.name);
            match failure_detail(&result.status) {
                Some(detail) => println!("{} ({})", line, detail),
                None => println!("{} ({})", line, format_duration(result.duration)),
            }
        }

        println!("\n{}", format_tally(summary.passed(), summary.total()));

        if summary.all_passed() {
            println!("\n✓ {}", SUCCESS_BANNER);
        } else {
            println!("\n✗ {}", FAILURE_BANNER);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints one line when the check finishes.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✗ {}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckResult, CheckStatus};
    use std::time::Duration;

    #[test]
    fn non_interactive_is_never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn keeps_output_mode() {
        let ui = NonInteractiveUI::new(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn spinner_and_summary_do_not_panic() {
        let mut ui = NonInteractiveUI::new(OutputMode::Silent);
        let mut spinner = ui.start_spinner("Running ESLint");
        spinner.finish_error("Running ESLint - exited with code 1");

        let summary = RunSummary::new(
            "frontend",
            vec![CheckResult::new(
                "lint",
                "Running ESLint",
                CheckStatus::Failed { exit_code: Some(1) },
                Duration::from_millis(10),
            )],
            Duration::from_millis(10),
        );
        ui.show_run_summary(&summary);
    }
}
