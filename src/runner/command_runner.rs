//! Running a single check.

use std::time::{Duration, Instant};

use crate::checks::{Check, CheckResult, CheckStatus};
use crate::config::RunnerConfig;
use crate::shell::{CommandExecutor, CommandOptions, CommandOutcome};
use crate::ui::{format_duration, UserInterface};

/// Executes one check under its timeout and reports the outcome.
///
/// Every failure mode (timeout, spawn failure, non-zero exit) is turned into
/// a failed [`CheckResult`]; nothing propagates past this boundary.
pub struct CommandRunner<'a> {
    executor: &'a dyn CommandExecutor,
    config: &'a RunnerConfig,
}

impl<'a> CommandRunner<'a> {
    pub fn new(executor: &'a dyn CommandExecutor, config: &'a RunnerConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        self.config
    }

    /// Timeout that applies to `check`.
    pub fn timeout_for(&self, check: &Check) -> Option<Duration> {
        check.timeout.or(self.config.default_timeout)
    }

    /// Run the check, printing its description and captured output.
    pub fn run(&self, check: &Check, ui: &mut dyn UserInterface) -> CheckResult {
        let timeout = self.timeout_for(check);
        let options = CommandOptions {
            cwd: Some(self.config.working_dir.clone()),
            env: self.config.env.clone(),
            timeout,
        };

        if ui.output_mode().shows_command_line() {
            ui.show_command(&check.command.to_string());
        }

        let mut spinner = ui.start_spinner(&check.description);
        let started = Instant::now();

        let (status, outcome) = match self.executor.execute(&check.command, &options) {
            Ok(outcome) => (status_of(&outcome, timeout), Some(outcome)),
            Err(e) => (
                CheckStatus::Errored {
                    message: e.to_string(),
                },
                None,
            ),
        };
        let duration = outcome
            .as_ref()
            .map(|o| o.duration)
            .unwrap_or_else(|| started.elapsed());

        tracing::debug!(
            check = %check.name,
            status = status.label(),
            ?duration,
            "check finished"
        );

        match &status {
            CheckStatus::Passed => spinner.finish_success(&format!(
                "{} ({})",
                check.description,
                format_duration(duration)
            )),
            CheckStatus::Failed {
                exit_code: Some(code),
            } => spinner.finish_error(&format!(
                "{} - exited with code {}",
                check.description, code
            )),
            CheckStatus::Failed { exit_code: None } => {
                spinner.finish_error(&format!("{} - killed by signal", check.description))
            }
            CheckStatus::TimedOut { after } => spinner.finish_error(&format!(
                "{} - timed out after {}",
                check.description,
                format_duration(*after)
            )),
            CheckStatus::Errored { message } => {
                spinner.finish_error(&format!("{} - {}", check.description, message))
            }
        }

        if let Some(outcome) = &outcome {
            // Failures always surface their output, even in quiet mode.
            let mode = ui.output_mode();
            if mode.shows_command_output() || (!status.is_passed() && mode.shows_status()) {
                ui.show_command_output(&outcome.stdout, &outcome.stderr);
            }
        }

        CheckResult::new(&check.name, &check.description, status, duration)
    }
}

fn status_of(outcome: &CommandOutcome, timeout: Option<Duration>) -> CheckStatus {
    if outcome.timed_out {
        CheckStatus::TimedOut {
            after: timeout.unwrap_or(outcome.duration),
        }
    } else if outcome.success() {
        CheckStatus::Passed
    } else {
        CheckStatus::Failed {
            exit_code: outcome.exit_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandSpec, ScriptedExecutor};
    use crate::ui::{MockUI, OutputMode};
    use std::path::PathBuf;

    fn lint_check() -> Check {
        Check::new("lint", "Running ESLint", CommandSpec::shell("npm run lint"))
    }

    #[test]
    fn zero_exit_passes() {
        let executor = ScriptedExecutor::new();
        executor.push_success("no problems");
        let config = RunnerConfig::new("/srv/web");
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::new();

        let result = runner.run(&lint_check(), &mut ui);

        assert!(result.passed());
        assert_eq!(result.name, "lint");
        assert!(ui.spinners().contains(&"Running ESLint".to_string()));
        assert!(ui.command_outputs()[0].0.contains("no problems"));
    }

    #[test]
    fn non_zero_exit_fails_and_surfaces_stderr() {
        let executor = ScriptedExecutor::new();
        executor.push_exit(1, "2 errors");
        let config = RunnerConfig::new("/srv/web");
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        let result = runner.run(&lint_check(), &mut ui);

        assert_eq!(result.status, CheckStatus::Failed { exit_code: Some(1) });
        assert_eq!(ui.command_outputs()[0].1, "2 errors");
    }

    #[test]
    fn quiet_mode_hides_output_of_passing_checks() {
        let executor = ScriptedExecutor::new();
        executor.push_success("lots of output");
        let config = RunnerConfig::new("/srv/web");
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        assert!(runner.run(&lint_check(), &mut ui).passed());
        assert!(ui.command_outputs().is_empty());
    }

    #[test]
    fn timeout_is_reported_with_configured_limit() {
        let executor = ScriptedExecutor::new();
        executor.push_timeout();
        let config =
            RunnerConfig::new("/srv/web").with_default_timeout(Some(Duration::from_secs(60)));
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::new();

        let result = runner.run(&lint_check(), &mut ui);

        assert_eq!(
            result.status,
            CheckStatus::TimedOut {
                after: Duration::from_secs(60)
            }
        );
        assert!(ui.spinner_errors()[0].contains("timed out after"));
    }

    #[test]
    fn spawn_failure_is_errored_not_propagated() {
        let executor = ScriptedExecutor::new();
        executor.push_spawn_error("No such file or directory");
        let config = RunnerConfig::new("/srv/web");
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::new();

        let result = runner.run(&lint_check(), &mut ui);

        assert!(!result.passed());
        assert!(matches!(result.status, CheckStatus::Errored { ref message } if message.contains("No such file")));
        assert!(ui.command_outputs().is_empty());
    }

    #[test]
    fn passes_working_dir_and_timeouts_to_executor() {
        let executor = ScriptedExecutor::new();
        let config = RunnerConfig::new("/srv/web");
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::new();

        runner.run(&lint_check(), &mut ui);
        runner.run(
            &lint_check().with_timeout(Duration::from_secs(300)),
            &mut ui,
        );

        let calls = executor.calls();
        assert_eq!(calls[0].cwd, Some(PathBuf::from("/srv/web")));
        assert_eq!(calls[0].timeout, Some(crate::config::DEFAULT_TIMEOUT));
        assert_eq!(calls[1].timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn verbose_mode_shows_command_line() {
        let executor = ScriptedExecutor::new();
        let config = RunnerConfig::new("/srv/web");
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        runner.run(&lint_check(), &mut ui);
        assert_eq!(ui.commands(), &["npm run lint".to_string()]);

        let mut normal = MockUI::new();
        runner.run(&lint_check(), &mut normal);
        assert!(normal.commands().is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn runs_real_commands_in_working_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join(".env.local"), "API_URL=x").unwrap();

        let executor = crate::shell::SystemExecutor;
        let config = RunnerConfig::new(temp.path());
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::new();

        let check = Check::new("env_check", "Env", CommandSpec::shell("test -f .env.local"));
        assert!(runner.run(&check, &mut ui).passed());

        let missing = Check::new("types", "Types", CommandSpec::shell("test -f types/api.ts"));
        assert!(!runner.run(&missing, &mut ui).passed());
    }

    #[test]
    #[cfg(unix)]
    fn signal_death_is_reported_as_killed() {
        let temp = tempfile::TempDir::new().unwrap();
        let executor = crate::shell::SystemExecutor;
        let config = RunnerConfig::new(temp.path());
        let runner = CommandRunner::new(&executor, &config);
        let mut ui = MockUI::new();

        let check = Check::new("dev_server", "Dev server", CommandSpec::shell("kill -9 $$"));
        let result = runner.run(&check, &mut ui);

        assert_eq!(result.status, CheckStatus::Failed { exit_code: None });
        assert!(ui.spinner_errors()[0].contains("killed by signal"));
    }
}
