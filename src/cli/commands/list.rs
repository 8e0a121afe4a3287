//! List command implementation.
//!
//! The `shipcheck list` command prints suites and their checks without
//! running anything.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::checks::{Suite, SuiteRegistry};
use crate::cli::args::ListArgs;
use crate::config::load_config;
use crate::error::{Result, ShipcheckError};
use crate::ui::{ShipcheckTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::run::USAGE_EXIT_CODE;

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

#[derive(Debug, Serialize)]
struct SuiteListing<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    checks: Vec<CheckListing<'a>>,
}

#[derive(Debug, Serialize)]
struct CheckListing<'a> {
    name: &'a str,
    description: &'a str,
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

impl<'a> From<&'a Suite> for SuiteListing<'a> {
    fn from(suite: &'a Suite) -> Self {
        Self {
            name: &suite.name,
            description: suite.description.as_deref(),
            checks: suite
                .checks
                .iter()
                .map(|check| CheckListing {
                    name: &check.name,
                    description: &check.description,
                    command: check.command.to_string(),
                    timeout_secs: check.timeout.map(|t| t.as_secs()),
                })
                .collect(),
        }
    }
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
        }
    }

    /// Load config from this file instead of discovering one.
    pub fn with_config_path(mut self, config_path: Option<&Path>) -> Self {
        self.config_path = config_path.map(Path::to_path_buf);
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn registry(&self) -> Result<SuiteRegistry> {
        let loaded = load_config(&self.project_root, self.config_path.as_deref())?;
        Ok(SuiteRegistry::builtin().with_suites(loaded.config.to_suites()?))
    }

    /// Suites to show, honoring `--suite`.
    fn selected<'r>(&self, registry: &'r SuiteRegistry) -> Result<Vec<&'r Suite>> {
        match &self.args.suite {
            Some(name) => Ok(vec![registry.get(name)?]),
            None => Ok(registry.suites().iter().collect()),
        }
    }

    fn print_json(&self, suites: &[&Suite]) -> Result<()> {
        let listing: Vec<SuiteListing<'_>> =
            suites.iter().map(|s| SuiteListing::from(*s)).collect();
        let json = serde_json::to_string_pretty(&listing).map_err(anyhow::Error::from)?;
        println!("{}", json);
        Ok(())
    }

    fn print_text(&self, suites: &[&Suite], ui: &mut dyn UserInterface) {
        let theme = ShipcheckTheme::detect();

        for (i, suite) in suites.iter().enumerate() {
            if i > 0 {
                ui.message("");
            }

            let detail = suite
                .description
                .as_deref()
                .map(|d| format!(" {}", theme.dim.apply_to(format!("- {}", d))))
                .unwrap_or_default();
            ui.message(&format!("  {}{}", theme.highlight.apply_to(&suite.name), detail));

            if suite.checks.is_empty() {
                ui.message(&format!("    {}", theme.dim.apply_to("(no checks)")));
            }

            for check in &suite.checks {
                ui.message(&format!(
                    "    {} {}",
                    theme.info.apply_to(&check.name),
                    theme.dim.apply_to(&check.description)
                ));
                ui.message(&format!(
                    "      {} {}",
                    theme.dim.apply_to("$"),
                    theme.command.apply_to(check.command.to_string())
                ));
            }
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = match self.registry() {
            Ok(registry) => registry,
            Err(e @ ShipcheckError::ConfigNotFound { .. })
            | Err(e @ ShipcheckError::ConfigParseError { .. })
            | Err(e @ ShipcheckError::ConfigValidationError { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(USAGE_EXIT_CODE));
            }
            Err(e) => return Err(e),
        };

        let suites = match self.selected(&registry) {
            Ok(suites) => suites,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(USAGE_EXIT_CODE));
            }
        };

        if self.args.json {
            self.print_json(&suites)?;
        } else {
            self.print_text(&suites, ui);
        }

        Ok(CommandResult::success())
    }
}
