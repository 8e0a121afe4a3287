//! Status icons for check results.

use crate::checks::CheckStatus;

use super::theme::ShipcheckTheme;

/// Visual category of a finished check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Exited zero.
    Pass,
    /// Exited non-zero.
    Fail,
    /// Killed at its timeout.
    Timeout,
    /// Could not be started.
    Error,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✗",
            Self::Timeout => "⏱",
            Self::Error => "⚠",
        }
    }

    /// Word shown next to the icon in the summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail | Self::Timeout | Self::Error => "FAIL",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &ShipcheckTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Pass => theme.success.apply_to(icon).to_string(),
            Self::Fail => theme.error.apply_to(icon).to_string(),
            Self::Timeout | Self::Error => theme.warning.apply_to(icon).to_string(),
        }
    }

    /// Summary line: `✓ PASS - name`.
    pub fn format_plain(self, name: &str) -> String {
        format!("{} {} - {}", self.icon(), self.label(), name)
    }
}

impl From<&CheckStatus> for StatusKind {
    fn from(status: &CheckStatus) -> Self {
        match status {
            CheckStatus::Passed => Self::Pass,
            CheckStatus::Failed { .. } => Self::Fail,
            CheckStatus::TimedOut { .. } => Self::Timeout,
            CheckStatus::Errored { .. } => Self::Error,
        }
    }
}

/// Short explanation of why a check failed, for the summary table.
pub fn failure_detail(status: &CheckStatus) -> Option<String> {
    match status {
        CheckStatus::Passed => None,
        CheckStatus::Failed {
            exit_code: Some(code),
        } => Some(format!("exit code {}", code)),
        CheckStatus::Failed { exit_code: None } => Some("killed by signal".to_string()),
        CheckStatus::TimedOut { after } => {
            Some(format!("timed out after {}", super::format_duration(*after)))
        }
        CheckStatus::Errored { .. } => Some("could not start".to_string()),
    }
}
