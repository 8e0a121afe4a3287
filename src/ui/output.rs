//! Output modes.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, plus the command line of each check.
    Verbose,
    /// Descriptions, captured output, and the summary.
    #[default]
    Normal,
    /// Status lines and summary; output only for failed checks.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Check if this mode echoes each command line before running it.
    pub fn shows_command_line(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows output of passing commands.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_verbose_shows_command_line() {
        assert!(OutputMode::Verbose.shows_command_line());
        assert!(!OutputMode::Normal.shows_command_line());
        assert!(!OutputMode::Quiet.shows_command_line());
    }

    #[test]
    fn quiet_hides_command_output() {
        assert!(OutputMode::Verbose.shows_command_output());
        assert!(OutputMode::Normal.shows_command_output());
        assert!(!OutputMode::Quiet.shows_command_output());
        assert!(!OutputMode::Silent.shows_command_output());
    }

    #[test]
    fn silent_hides_status() {
        assert!(OutputMode::Quiet.shows_status());
        assert!(!OutputMode::Silent.shows_status());
        assert!(!OutputMode::Silent.shows_spinners());
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
