//! Machine-readable run report for `--json`.

use serde::Serialize;

use crate::checks::{CheckResult, CheckStatus};
use crate::error::Result;

use super::summary::RunSummary;

/// Top-level JSON document printed by `shipcheck run --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonReport {
    pub suite: String,
    pub passed: usize,
    pub total: usize,
    pub success: bool,
    pub duration_ms: u128,
    pub checks: Vec<JsonCheck>,
}

/// One entry per check, in run order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonCheck {
    pub name: String,
    pub description: String,
    pub passed: bool,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&CheckResult> for JsonCheck {
    fn from(result: &CheckResult) -> Self {
        let (exit_code, message) = match &result.status {
            CheckStatus::Passed => (Some(0), None),
            CheckStatus::Failed { exit_code } => (*exit_code, None),
            CheckStatus::TimedOut { after } => {
                (None, Some(format!("timed out after {}s", after.as_secs())))
            }
            CheckStatus::Errored { message } => (None, Some(message.clone())),
        };

        Self {
            name: result.name.clone(),
            description: result.description.clone(),
            passed: result.passed(),
            status: result.status.label(),
            exit_code,
            duration_ms: result.duration.as_millis(),
            message,
        }
    }
}

impl From<&RunSummary> for JsonReport {
    fn from(summary: &RunSummary) -> Self {
        Self {
            suite: summary.suite.clone(),
            passed: summary.passed(),
            total: summary.total(),
            success: summary.all_passed(),
            duration_ms: summary.total_duration.as_millis(),
            checks: summary.results.iter().map(JsonCheck::from).collect(),
        }
    }
}

/// Render the summary as pretty-printed JSON.
pub fn to_json(summary: &RunSummary) -> Result<String> {
    let report = JsonReport::from(summary);
    let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn summary() -> RunSummary {
        RunSummary::new(
            "frontend",
            vec![
                CheckResult::new(
                    "lint",
                    "Running ESLint",
                    CheckStatus::Passed,
                    Duration::from_millis(1200),
                ),
                CheckResult::new(
                    "build",
                    "Building",
                    CheckStatus::Failed { exit_code: Some(2) },
                    Duration::from_millis(300),
                ),
                CheckResult::new(
                    "e2e",
                    "End to end",
                    CheckStatus::TimedOut {
                        after: Duration::from_secs(60),
                    },
                    Duration::from_secs(60),
                ),
            ],
            Duration::from_millis(61_500),
        )
    }

    #[test]
    fn report_carries_tally_and_per_check_status() {
        let report = JsonReport::from(&summary());

        assert_eq!(report.suite, "frontend");
        assert_eq!(report.passed, 1);
        assert_eq!(report.total, 3);
        assert!(!report.success);
        assert_eq!(report.checks[0].exit_code, Some(0));
        assert_eq!(report.checks[1].status, "failed");
        assert_eq!(report.checks[1].exit_code, Some(2));
        assert_eq!(report.checks[2].status, "timed_out");
        assert_eq!(
            report.checks[2].message.as_deref(),
            Some("timed out after 60s")
        );
    }

    #[test]
    fn json_output_parses_back() {
        let json = to_json(&summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["checks"][0]["name"], "lint");
        assert_eq!(value["checks"][0]["duration_ms"], 1200);
        assert!(value["checks"][1].get("message").is_none());
    }

    #[test]
    fn empty_run_is_successful() {
        let json = to_json(&RunSummary::new("empty", vec![], Duration::ZERO)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["checks"].as_array().map(Vec::len), Some(0));
    }
}
