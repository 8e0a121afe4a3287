//! Shipcheck - pre-deployment checks for a project.
//!
//! Shipcheck runs an ordered checklist of external commands (toolchain
//! version checks, lint, build, file-presence tests) against a working directory,
//! treats each one as pass/fail, and prints a summary. The process exits 0
//! only when every check passed.
//!
//! # Modules
//!
//! - [`checks`] - Checks, suites, and the built-in checklists
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Running checks and tallying results
//! - [`shell`] - Shell command execution with timeouts
//! - [`ui`] - Spinners, summaries, and terminal output
//!
//! # Example
//!
//! ```
//! use shipcheck::checks::{Check, Suite};
//! use shipcheck::config::RunnerConfig;
//! use shipcheck::runner::{CommandRunner, Driver};
//! use shipcheck::shell::{CommandSpec, ScriptedExecutor};
//! use shipcheck::ui::MockUI;
//!
//! let executor = ScriptedExecutor::new();
//! executor.push_success("v20.11.0");
//! executor.push_exit(1, "lint errors");
//!
//! let suite = Suite::new(
//!     "web",
//!     vec![
//!         Check::new("node", "Checking Node.js", CommandSpec::shell("node --version")),
//!         Check::new("lint", "Running ESLint", CommandSpec::shell("npm run lint")),
//!     ],
//! );
//! let config = RunnerConfig::new(".");
//! let runner = CommandRunner::new(&executor, &config);
//!
//! let summary = Driver::for_suite(&runner, &suite).run(&mut MockUI::new());
//! assert_eq!(summary.passed(), 1);
//! assert_eq!(summary.exit_code(), 1);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, ShipcheckError};
