//! Aggregated results of a run.

use std::time::Duration;

use crate::checks::CheckResult;

/// Results of one driver pass, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Suite (or driver title) that was run.
    pub suite: String,
    /// One result per declared check.
    pub results: Vec<CheckResult>,
    /// Wall-clock time for the whole pass.
    pub total_duration: Duration,
}

impl RunSummary {
    pub fn new(suite: &str, results: Vec<CheckResult>, total_duration: Duration) -> Self {
        Self {
            suite: suite.to_string(),
            results,
            total_duration,
        }
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// True when no check failed, including when there were no checks.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }

    /// Process exit code: 0 iff every check passed.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;

    fn result(name: &str, status: CheckStatus) -> CheckResult {
        CheckResult::new(name, name, status, Duration::from_millis(5))
    }

    #[test]
    fn second_of_three_failing_is_two_of_three() {
        let summary = RunSummary::new(
            "frontend",
            vec![
                result("a", CheckStatus::Passed),
                result("b", CheckStatus::Failed { exit_code: Some(1) }),
                result("c", CheckStatus::Passed),
            ],
            Duration::from_secs(1),
        );

        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.total(), 3);
        assert!(!summary.all_passed());
        assert_eq!(summary.exit_code(), 1);
        assert!(!summary.results[1].passed());
    }

    #[test]
    fn empty_summary_is_vacuously_successful() {
        let summary = RunSummary::new("empty", vec![], Duration::ZERO);
        assert_eq!(summary.total(), 0);
        assert!(summary.all_passed());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn timeouts_and_errors_count_as_failures() {
        let summary = RunSummary::new(
            "frontend",
            vec![
                result(
                    "slow",
                    CheckStatus::TimedOut {
                        after: Duration::from_secs(60),
                    },
                ),
                result(
                    "missing",
                    CheckStatus::Errored {
                        message: "not found".into(),
                    },
                ),
            ],
            Duration::from_secs(60),
        );
        assert_eq!(summary.passed(), 0);
        assert_eq!(summary.exit_code(), 1);
    }
}
