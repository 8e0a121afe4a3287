//! Scripted executor for testing.
//!
//! `ScriptedExecutor` implements [`CommandExecutor`] without spawning
//! anything. Outcomes are replayed in the order they were queued and every
//! invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use shipcheck::shell::{CommandExecutor, CommandOptions, CommandSpec, ScriptedExecutor};
//!
//! let executor = ScriptedExecutor::new();
//! executor.push_exit(1, "lint errors");
//!
//! let outcome = executor
//!     .execute(&CommandSpec::shell("npm run lint"), &CommandOptions::default())
//!     .unwrap();
//! assert!(!outcome.success());
//! assert_eq!(executor.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ShipcheckError};

use super::command::{CommandExecutor, CommandOptions, CommandOutcome, CommandSpec};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedCall {
    pub spec: CommandSpec,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
enum Scripted {
    Outcome(CommandOutcome),
    SpawnError(String),
}

/// Executor that replays queued outcomes.
///
/// Once the queue is exhausted every further command succeeds with empty
/// output.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    queue: RefCell<VecDeque<Scripted>>,
    calls: RefCell<Vec<ScriptedCall>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary outcome.
    pub fn push_outcome(&self, outcome: CommandOutcome) {
        self.queue.borrow_mut().push_back(Scripted::Outcome(outcome));
    }

    /// Queue a zero exit with the given stdout.
    pub fn push_success(&self, stdout: &str) {
        self.push_outcome(CommandOutcome::exited(
            Some(0),
            stdout,
            "",
            Duration::from_millis(1),
        ));
    }

    /// Queue a non-zero exit with the given stderr.
    pub fn push_exit(&self, code: i32, stderr: &str) {
        self.push_outcome(CommandOutcome::exited(
            Some(code),
            "",
            stderr,
            Duration::from_millis(1),
        ));
    }

    /// Queue a command that hits its timeout.
    pub fn push_timeout(&self) {
        self.push_outcome(CommandOutcome::timed_out("", "", Duration::from_millis(1)));
    }

    /// Queue a command that cannot be started.
    pub fn push_spawn_error(&self, message: &str) {
        self.queue
            .borrow_mut()
            .push_back(Scripted::SpawnError(message.to_string()));
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandOutcome> {
        spec.validate()?;

        self.calls.borrow_mut().push(ScriptedCall {
            spec: spec.clone(),
            cwd: options.cwd.clone(),
            timeout: options.timeout,
        });

        match self.queue.borrow_mut().pop_front() {
            Some(Scripted::Outcome(outcome)) => Ok(outcome),
            Some(Scripted::SpawnError(message)) => Err(ShipcheckError::SpawnFailed {
                command: spec.to_string(),
                message,
            }),
            None => Ok(CommandOutcome::exited(Some(0), "", "", Duration::ZERO)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_queue_order() {
        let executor = ScriptedExecutor::new();
        executor.push_success("v20.11.0");
        executor.push_exit(2, "boom");
        executor.push_timeout();

        let options = CommandOptions::default();
        let spec = CommandSpec::shell("x");

        let first = executor.execute(&spec, &options).unwrap();
        assert!(first.success());
        assert_eq!(first.stdout, "v20.11.0");

        let second = executor.execute(&spec, &options).unwrap();
        assert_eq!(second.exit_code, Some(2));
        assert_eq!(second.stderr, "boom");

        let third = executor.execute(&spec, &options).unwrap();
        assert!(third.timed_out);
    }

    #[test]
    fn exhausted_queue_succeeds() {
        let executor = ScriptedExecutor::new();
        let outcome = executor
            .execute(&CommandSpec::shell("anything"), &CommandOptions::default())
            .unwrap();
        assert!(outcome.success());
    }

    #[test]
    fn spawn_error_is_returned_as_err() {
        let executor = ScriptedExecutor::new();
        executor.push_spawn_error("No such file or directory");

        let err = executor
            .execute(&CommandSpec::program(["npm"]), &CommandOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn records_spec_cwd_and_timeout() {
        let executor = ScriptedExecutor::new();
        let options = CommandOptions {
            cwd: Some(PathBuf::from("/srv/web")),
            timeout: Some(Duration::from_secs(60)),
            ..Default::default()
        };

        executor
            .execute(&CommandSpec::shell("npm run build"), &options)
            .unwrap();

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].spec, CommandSpec::shell("npm run build"));
        assert_eq!(calls[0].cwd, Some(PathBuf::from("/srv/web")));
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn invalid_spec_is_rejected_before_recording() {
        let executor = ScriptedExecutor::new();
        assert!(executor
            .execute(&CommandSpec::shell(""), &CommandOptions::default())
            .is_err());
        assert!(executor.calls().is_empty());
    }
}
