//! Suite lookup across built-in and configured suites.

use crate::error::{Result, ShipcheckError};

use super::{builtin_suites, Suite};

/// Named suites available to a run.
///
/// Configured suites replace a built-in suite of the same name and are
/// otherwise appended after the built-ins.
#[derive(Debug, Clone)]
pub struct SuiteRegistry {
    suites: Vec<Suite>,
}

impl Default for SuiteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SuiteRegistry {
    /// Registry holding only the built-in suites.
    pub fn builtin() -> Self {
        Self {
            suites: builtin_suites(),
        }
    }

    /// Add or replace suites.
    pub fn with_suites(mut self, suites: impl IntoIterator<Item = Suite>) -> Self {
        for suite in suites {
            match self.suites.iter_mut().find(|s| s.name == suite.name) {
                Some(existing) => {
                    tracing::debug!(suite = %suite.name, "configured suite overrides built-in");
                    *existing = suite;
                }
                None => self.suites.push(suite),
            }
        }
        self
    }

    /// Look up a suite by name.
    pub fn get(&self, name: &str) -> Result<&Suite> {
        self.suites
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ShipcheckError::UnknownSuite {
                name: name.to_string(),
            })
    }

    /// All suites in display order.
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    pub fn names(&self) -> Vec<&str> {
        self.suites.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Check;
    use crate::shell::CommandSpec;

    #[test]
    fn builtin_registry_has_frontend_and_build() {
        let registry = SuiteRegistry::builtin();
        assert_eq!(registry.names(), vec!["frontend", "build"]);
        assert!(registry.get("frontend").is_ok());
    }

    #[test]
    fn unknown_suite_is_an_error() {
        let err = SuiteRegistry::builtin().get("nightly").unwrap_err();
        assert!(matches!(err, ShipcheckError::UnknownSuite { .. }));
    }

    #[test]
    fn configured_suite_replaces_builtin_with_same_name() {
        let custom = Suite::new(
            "build",
            vec![Check::new("b", "Build", CommandSpec::shell("make"))],
        );
        let registry = SuiteRegistry::builtin().with_suites([custom]);

        assert_eq!(registry.suites().len(), 2);
        assert_eq!(registry.get("build").unwrap().check_names(), vec!["b"]);
    }

    #[test]
    fn configured_suite_is_appended() {
        let smoke = Suite::new("smoke", vec![]);
        let registry = SuiteRegistry::builtin().with_suites([smoke]);
        assert_eq!(registry.names(), vec!["frontend", "build", "smoke"]);
    }
}
