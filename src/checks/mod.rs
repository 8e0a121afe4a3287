//! Checks, suites, and per-check results.
//!
//! A [`Check`] is one named external command treated as pass/fail. A
//! [`Suite`] is an ordered list of checks. Running a check yields exactly one
//! [`CheckResult`].

pub mod builtin;
pub mod registry;

pub use builtin::{build_suite, builtin_suites, frontend_suite, DEFAULT_SUITE};
pub use registry::SuiteRegistry;

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{Result, ShipcheckError};
use crate::shell::CommandSpec;

/// One named command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Label used in the summary and for `--only`/`--skip`.
    pub name: String,
    /// Human-readable description printed while the check runs.
    pub description: String,
    /// What to execute.
    pub command: CommandSpec,
    /// Per-check timeout (falls back to the runner default).
    pub timeout: Option<Duration>,
}

impl Check {
    /// Create a check without its own timeout.
    pub fn new(name: &str, description: &str, command: CommandSpec) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            command,
            timeout: None,
        }
    }

    /// Set a per-check timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// How a check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Exited with status zero.
    Passed,
    /// Exited non-zero (None when killed by a signal).
    Failed { exit_code: Option<i32> },
    /// Killed after running for `after`.
    TimedOut { after: Duration },
    /// Could not be started at all.
    Errored { message: String },
}

impl CheckStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::TimedOut { .. } => "timed_out",
            Self::Errored { .. } => "errored",
        }
    }
}

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub description: String,
    pub status: CheckStatus,
    pub duration: Duration,
}

impl CheckResult {
    pub fn new(name: &str, description: &str, status: CheckStatus, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status,
            duration,
        }
    }

    /// Whether the check passed.
    pub fn passed(&self) -> bool {
        self.status.is_passed()
    }
}

/// A named, ordered list of checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    pub name: String,
    pub description: Option<String>,
    pub checks: Vec<Check>,
}

impl Suite {
    pub fn new(name: &str, checks: Vec<Check>) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            checks,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Names of all checks in declaration order.
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name.as_str()).collect()
    }

    /// Narrow the suite to `only` (when non-empty) minus `skip`.
    ///
    /// Declaration order is preserved regardless of the order names are
    /// given in. Names the suite does not declare are rejected.
    pub fn select(&self, only: &[String], skip: &[String]) -> Result<Suite> {
        let known: HashSet<&str> = self.checks.iter().map(|c| c.name.as_str()).collect();
        for name in only.iter().chain(skip) {
            if !known.contains(name.as_str()) {
                return Err(ShipcheckError::UnknownCheck {
                    suite: self.name.clone(),
                    name: name.clone(),
                });
            }
        }

        let only: HashSet<&str> = only.iter().map(String::as_str).collect();
        let skip: HashSet<&str> = skip.iter().map(String::as_str).collect();

        let checks = self
            .checks
            .iter()
            .filter(|c| only.is_empty() || only.contains(c.name.as_str()))
            .filter(|c| !skip.contains(c.name.as_str()))
            .cloned()
            .collect();

        Ok(Suite {
            name: self.name.clone(),
            description: self.description.clone(),
            checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suite() -> Suite {
        Suite::new(
            "web",
            vec![
                Check::new("node", "Checking node", CommandSpec::shell("node -v")),
                Check::new("lint", "Linting", CommandSpec::shell("npm run lint")),
                Check::new("build", "Building", CommandSpec::shell("npm run build")),
            ],
        )
    }

    #[test]
    fn select_nothing_keeps_everything() {
        let selected = suite().select(&[], &[]).unwrap();
        assert_eq!(selected.check_names(), vec!["node", "lint", "build"]);
    }

    #[test]
    fn select_only_preserves_declaration_order() {
        let only = vec!["build".to_string(), "node".to_string()];
        let selected = suite().select(&only, &[]).unwrap();
        assert_eq!(selected.check_names(), vec!["node", "build"]);
    }

    #[test]
    fn select_skip_drops_named_checks() {
        let skip = vec!["lint".to_string()];
        let selected = suite().select(&[], &skip).unwrap();
        assert_eq!(selected.check_names(), vec!["node", "build"]);
    }

    #[test]
    fn select_rejects_unknown_names() {
        let only = vec!["e2e".to_string()];
        let err = suite().select(&only, &[]).unwrap_err();
        assert!(matches!(err, ShipcheckError::UnknownCheck { ref name, .. } if name == "e2e"));

        let skip = vec!["typo".to_string()];
        assert!(suite().select(&[], &skip).is_err());
    }

    #[test]
    fn check_with_timeout() {
        let check = Check::new("build", "Build", CommandSpec::shell("npm run build"))
            .with_timeout(Duration::from_secs(300));
        assert_eq!(check.timeout, Some(Duration::from_secs(300)));
    }

    #[test]
    fn only_passed_status_counts_as_passed() {
        assert!(CheckStatus::Passed.is_passed());
        assert!(!CheckStatus::Failed { exit_code: Some(1) }.is_passed());
        assert!(!CheckStatus::TimedOut {
            after: Duration::from_secs(60)
        }
        .is_passed());
        assert!(!CheckStatus::Errored {
            message: "missing".into()
        }
        .is_passed());
    }

    #[test]
    fn status_labels() {
        assert_eq!(CheckStatus::Passed.label(), "passed");
        assert_eq!(CheckStatus::Failed { exit_code: None }.label(), "failed");
        assert_eq!(
            CheckStatus::TimedOut {
                after: Duration::ZERO
            }
            .label(),
            "timed_out"
        );
    }
}
