//! Configuration schema definitions.
//!
//! These structs map to the `shipcheck.yml` file format.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use crate::checks::{Check, Suite};
use crate::error::{Result, ShipcheckError};
use crate::shell::CommandSpec;

/// Root configuration structure for shipcheck.yml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShipcheckConfig {
    /// Directory checks run in, relative to the config file
    pub working_dir: Option<PathBuf>,

    /// Timeout in seconds for checks that don't set their own
    pub default_timeout: Option<u64>,

    /// Extra environment variables for every check
    pub env: HashMap<String, String>,

    /// Suite definitions, keyed by suite name
    pub suites: BTreeMap<String, SuiteConfig>,
}

/// A named list of checks
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    pub description: Option<String>,

    pub checks: Vec<CheckConfig>,
}

/// A single check. Exactly one of `run` or `program` must be set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    pub name: String,

    /// Printed while the check runs (defaults to the name)
    pub description: Option<String>,

    /// Shell command line
    pub run: Option<String>,

    /// Program and arguments, run without a shell
    pub program: Option<Vec<String>>,

    /// Timeout in seconds
    pub timeout: Option<u64>,
}

impl CheckConfig {
    /// The command this check runs.
    pub fn command(&self) -> Result<CommandSpec> {
        let spec = match (&self.run, &self.program) {
            (Some(line), None) => CommandSpec::shell(line.clone()),
            (None, Some(args)) => CommandSpec::Program(args.clone()),
            (Some(_), Some(_)) => {
                return Err(ShipcheckError::ConfigValidationError {
                    message: format!("check '{}' sets both 'run' and 'program'", self.name),
                })
            }
            (None, None) => {
                return Err(ShipcheckError::ConfigValidationError {
                    message: format!("check '{}' needs 'run' or 'program'", self.name),
                })
            }
        };

        spec.validate()
            .map_err(|e| ShipcheckError::ConfigValidationError {
                message: format!("check '{}': {}", self.name, e),
            })?;
        Ok(spec)
    }

    pub fn to_check(&self) -> Result<Check> {
        let description = self.description.as_deref().unwrap_or(&self.name);
        let mut check = Check::new(&self.name, description, self.command()?);
        check.timeout = self.timeout.map(Duration::from_secs);
        Ok(check)
    }
}

impl ShipcheckConfig {
    /// Convert configured suites into runnable ones.
    pub fn to_suites(&self) -> Result<Vec<Suite>> {
        self.suites
            .iter()
            .map(|(name, suite)| {
                let checks = suite
                    .checks
                    .iter()
                    .map(CheckConfig::to_check)
                    .collect::<Result<Vec<_>>>()?;
                let mut out = Suite::new(name, checks);
                out.description = suite.description.clone();
                Ok(out)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ShipcheckConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn empty_document_is_default() {
        let config = parse("{}");
        assert_eq!(config, ShipcheckConfig::default());
    }

    #[test]
    fn parses_full_config() {
        let config = parse(
            r#"
working_dir: web
default_timeout: 90
env:
  NODE_ENV: production
suites:
  smoke:
    description: Quick smoke test
    checks:
      - name: node
        description: Checking Node.js
        run: node --version
      - name: build
        program: [npm, run, build]
        timeout: 300
"#,
        );

        assert_eq!(config.working_dir, Some(PathBuf::from("web")));
        assert_eq!(config.default_timeout, Some(90));
        assert_eq!(config.env.get("NODE_ENV").unwrap(), "production");

        let smoke = &config.suites["smoke"];
        assert_eq!(smoke.checks.len(), 2);
        assert_eq!(smoke.checks[1].timeout, Some(300));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<ShipcheckConfig, _> =
            serde_yaml::from_str("workdir: web\n");
        assert!(result.is_err());
    }

    #[test]
    fn check_converts_shell_and_program() {
        let shell = CheckConfig {
            name: "lint".into(),
            run: Some("npm run lint".into()),
            ..Default::default()
        };
        assert_eq!(shell.command().unwrap(), CommandSpec::shell("npm run lint"));

        let program = CheckConfig {
            name: "build".into(),
            program: Some(vec!["npm".into(), "run".into(), "build".into()]),
            timeout: Some(300),
            ..Default::default()
        };
        let check = program.to_check().unwrap();
        assert_eq!(check.command, CommandSpec::program(["npm", "run", "build"]));
        assert_eq!(check.timeout, Some(Duration::from_secs(300)));
        assert_eq!(check.description, "build");
    }

    #[test]
    fn check_requires_exactly_one_command_form() {
        let neither = CheckConfig {
            name: "x".into(),
            ..Default::default()
        };
        assert!(neither.command().is_err());

        let both = CheckConfig {
            name: "x".into(),
            run: Some("true".into()),
            program: Some(vec!["true".into()]),
            ..Default::default()
        };
        assert!(both.command().is_err());
    }

    #[test]
    fn empty_program_is_rejected() {
        let check = CheckConfig {
            name: "x".into(),
            program: Some(vec![]),
            ..Default::default()
        };
        assert!(check.command().is_err());
    }

    #[test]
    fn to_suites_keeps_check_order() {
        let config = parse(
            r#"
suites:
  smoke:
    checks:
      - { name: c, run: "true" }
      - { name: a, run: "true" }
      - { name: b, run: "true" }
"#,
        );
        let suites = config.to_suites().unwrap();
        assert_eq!(suites[0].check_names(), vec!["c", "a", "b"]);
    }
}
