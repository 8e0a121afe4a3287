//! Run command implementation.
//!
//! The `shipcheck run` command executes a check suite and reports the tally.

use std::path::{Path, PathBuf};

use crate::checks::{Suite, SuiteRegistry};
use crate::cli::args::RunArgs;
use crate::config::{load_config, RunnerConfig};
use crate::error::{Result, ShipcheckError};
use crate::runner::{to_json, CommandRunner, Driver, RunSummary};
use crate::shell::{CommandExecutor, SystemExecutor};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Exit code for usage and configuration errors.
pub const USAGE_EXIT_CODE: i32 = 2;

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
    executor: Box<dyn CommandExecutor>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
            executor: Box::new(SystemExecutor),
        }
    }

    /// Load config from this file instead of discovering one.
    pub fn with_config_path(mut self, config_path: Option<&Path>) -> Self {
        self.config_path = config_path.map(Path::to_path_buf);
        self
    }

    /// Replace the process executor.
    pub fn with_executor(mut self, executor: Box<dyn CommandExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Load config and pick the suite and runner settings for this run.
    fn prepare(&self) -> Result<(Suite, RunnerConfig)> {
        let loaded = load_config(&self.project_root, self.config_path.as_deref())?;
        if let Some(path) = &loaded.path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        let registry = SuiteRegistry::builtin().with_suites(loaded.config.to_suites()?);
        let suite = registry
            .get(&self.args.suite)?
            .select(&self.args.only, &self.args.skip)?;

        let runner_config = RunnerConfig::resolve(&self.project_root, &loaded, self.args.timeout);
        Ok((suite, runner_config))
    }

    fn report(&self, summary: &RunSummary) -> Result<()> {
        if self.args.json {
            println!("{}", to_json(summary)?);
        }
        Ok(())
    }
}

/// Whether an error is the user's to fix (bad flag, bad config).
fn is_usage_error(err: &ShipcheckError) -> bool {
    matches!(
        err,
        ShipcheckError::ConfigNotFound { .. }
            | ShipcheckError::ConfigParseError { .. }
            | ShipcheckError::ConfigValidationError { .. }
            | ShipcheckError::UnknownSuite { .. }
            | ShipcheckError::UnknownCheck { .. }
            | ShipcheckError::InvalidCommand { .. }
    )
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (suite, runner_config) = match self.prepare() {
            Ok(prepared) => prepared,
            Err(e) if is_usage_error(&e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(USAGE_EXIT_CODE));
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            suite = %suite.name,
            checks = suite.checks.len(),
            working_dir = %runner_config.working_dir.display(),
            "starting run"
        );

        if ui.output_mode().shows_command_line() {
            ui.message(&format!(
                "Working directory: {}",
                runner_config.working_dir.display()
            ));
        }

        let runner = CommandRunner::new(self.executor.as_ref(), &runner_config);
        let summary = Driver::for_suite(&runner, &suite).run(ui);

        self.report(&summary)?;

        if summary.all_passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(summary.exit_code()))
        }
    }
}
