//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use shipcheck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Starting checks");
//! ui.success("Done!");
//!
//! // Assert on captured interactions
//! assert!(ui.messages().contains(&"Starting checks".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::runner::RunSummary;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// How a mock spinner was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

type FinishLog = Rc<RefCell<Vec<(SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(usize, usize)>,
    spinners: Vec<String>,
    spinner_finishes: FinishLog,
    commands: Vec<String>,
    command_outputs: Vec<(String, String)>,
    summaries: Vec<RunSummary>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured progress updates.
    pub fn progress(&self) -> &[(usize, usize)] {
        &self.progress
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Finish messages of spinners that ended successfully.
    pub fn spinner_successes(&self) -> Vec<String> {
        self.finishes_with(SpinnerStatus::Success)
    }

    /// Finish messages of spinners that ended with an error.
    pub fn spinner_errors(&self) -> Vec<String> {
        self.finishes_with(SpinnerStatus::Error)
    }

    fn finishes_with(&self, status: SpinnerStatus) -> Vec<String> {
        self.spinner_finishes
            .borrow()
            .iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Get all command lines shown.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Get all captured command output as (stdout, stderr).
    pub fn command_outputs(&self) -> &[(String, String)] {
        &self.command_outputs
    }

    /// Get all captured run summaries.
    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            log: Rc::clone(&self.spinner_finishes),
            ..Default::default()
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn show_command_output(&mut self, stdout: &str, stderr: &str) {
        self.command_outputs
            .push((stdout.to_string(), stderr.to_string()));
    }

    fn show_run_summary(&mut self, summary: &RunSummary) {
        self.summaries.push(summary.clone());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    status: Option<SpinnerStatus>,
    log: FinishLog,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// How the spinner was finished, if it was.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        self.status = Some(status);
        self.log.borrow_mut().push((status, msg.to_string()));
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUI::new();
        ui.message("msg");
        ui.success("ok");
        ui.warning("careful");
        ui.error("bad");

        assert!(ui.has_message("msg"));
        assert_eq!(ui.successes(), &["ok".to_string()]);
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("bad"));
    }

    #[test]
    fn spinner_finishes_are_visible_on_the_ui() {
        let mut ui = MockUI::new();

        let mut ok = ui.start_spinner("Running ESLint");
        ok.finish_success("Running ESLint (10ms)");
        let mut bad = ui.start_spinner("Building");
        bad.finish_error("Building - exited with code 1");

        assert_eq!(ui.spinners().len(), 2);
        assert_eq!(ui.spinner_successes(), vec!["Running ESLint (10ms)"]);
        assert_eq!(ui.spinner_errors(), vec!["Building - exited with code 1"]);
    }

    #[test]
    fn standalone_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        assert_eq!(spinner.status(), None);
        spinner.finish_error("failed");
        assert_eq!(spinner.status(), Some(SpinnerStatus::Error));
    }

    #[test]
    fn captures_progress_output_and_summaries() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        ui.show_progress(1, 3);
        ui.show_command("npm run lint");
        ui.show_command_output("out", "err");
        ui.show_run_summary(&RunSummary::new("frontend", vec![], Duration::ZERO));

        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert_eq!(ui.progress(), &[(1, 3)]);
        assert_eq!(ui.commands(), &["npm run lint".to_string()]);
        assert_eq!(
            ui.command_outputs(),
            &[("out".to_string(), "err".to_string())]
        );
        assert_eq!(ui.summaries().len(), 1);
    }

    #[test]
    fn interactive_flag_is_settable() {
        let mut ui = MockUI::new();
        assert!(!ui.is_interactive());
        ui.set_interactive(true);
        assert!(ui.is_interactive());
    }
}
