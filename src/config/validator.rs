//! Configuration validation.

use std::collections::HashSet;

use crate::error::{Result, ShipcheckError};

use super::schema::ShipcheckConfig;

/// One problem found in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Where the problem is, e.g. `suites.smoke.checks[1]`.
    pub location: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Collect every problem in the config.
pub fn validate_config(config: &ShipcheckConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.default_timeout == Some(0) {
        errors.push(ValidationError {
            location: "default_timeout".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    for (suite_name, suite) in &config.suites {
        if suite_name.trim().is_empty() {
            errors.push(ValidationError {
                location: "suites".to_string(),
                message: "suite name must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (i, check) in suite.checks.iter().enumerate() {
            let location = format!("suites.{}.checks[{}]", suite_name, i);

            if check.name.trim().is_empty() {
                errors.push(ValidationError {
                    location: location.clone(),
                    message: "name must not be empty".to_string(),
                });
            } else if !seen.insert(check.name.as_str()) {
                errors.push(ValidationError {
                    location: location.clone(),
                    message: format!("duplicate check name '{}'", check.name),
                });
            }

            if check.timeout == Some(0) {
                errors.push(ValidationError {
                    location: location.clone(),
                    message: "timeout must be greater than zero".to_string(),
                });
            }

            if let Err(e) = check.command() {
                let message = match e {
                    ShipcheckError::ConfigValidationError { message } => message,
                    other => other.to_string(),
                };
                errors.push(ValidationError { location, message });
            }
        }
    }

    errors
}

/// Validate the config, failing on the first batch of problems.
pub fn validate(config: &ShipcheckConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(ShipcheckError::ConfigValidationError { message })
}
