//! Settings handed to the command runner at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::loader::LoadedConfig;

/// Timeout for checks that set none, unless config or CLI override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Runner settings resolved from defaults, the config file, and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory every check runs in.
    pub working_dir: PathBuf,

    /// Timeout for checks without their own (None = unbounded).
    pub default_timeout: Option<Duration>,

    /// Extra environment variables for every check.
    pub env: HashMap<String, String>,
}

impl RunnerConfig {
    /// Defaults for the given working directory.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            default_timeout: Some(DEFAULT_TIMEOUT),
            env: HashMap::new(),
        }
    }

    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Resolve settings in priority order: CLI > config file > defaults.
    ///
    /// A relative `working_dir` from the config file is taken relative to
    /// the file's own directory; without one, checks run in `project_root`.
    pub fn resolve(
        project_root: &Path,
        loaded: &LoadedConfig,
        timeout_secs_override: Option<u64>,
    ) -> Self {
        let config = &loaded.config;

        let working_dir = match &config.working_dir {
            Some(dir) => loaded.base_dir().unwrap_or(project_root).join(dir),
            None => project_root.to_path_buf(),
        };

        let default_timeout = timeout_secs_override
            .or(config.default_timeout)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            working_dir,
            default_timeout: Some(default_timeout),
            env: config.env.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShipcheckConfig;

    #[test]
    fn new_uses_default_timeout() {
        let config = RunnerConfig::new("/srv/web");
        assert_eq!(config.working_dir, PathBuf::from("/srv/web"));
        assert_eq!(config.default_timeout, Some(DEFAULT_TIMEOUT));
    }

    #[test]
    fn resolve_without_config_uses_project_root() {
        let config = RunnerConfig::resolve(Path::new("/srv/web"), &LoadedConfig::default(), None);
        assert_eq!(config.working_dir, PathBuf::from("/srv/web"));
        assert_eq!(config.default_timeout, Some(DEFAULT_TIMEOUT));
        assert!(config.env.is_empty());
    }

    #[test]
    fn resolve_joins_working_dir_to_config_directory() {
        let loaded = LoadedConfig {
            path: Some(PathBuf::from("/repo/shipcheck.yml")),
            config: ShipcheckConfig {
                working_dir: Some(PathBuf::from("apps/web")),
                ..Default::default()
            },
        };

        let config = RunnerConfig::resolve(Path::new("/elsewhere"), &loaded, None);
        assert_eq!(config.working_dir, PathBuf::from("/repo/apps/web"));
    }

    #[test]
    fn resolve_keeps_absolute_working_dir() {
        let loaded = LoadedConfig {
            path: Some(PathBuf::from("/repo/shipcheck.yml")),
            config: ShipcheckConfig {
                working_dir: Some(PathBuf::from("/vercel/share/project")),
                ..Default::default()
            },
        };

        let config = RunnerConfig::resolve(Path::new("/repo"), &loaded, None);
        assert_eq!(config.working_dir, PathBuf::from("/vercel/share/project"));
    }

    #[test]
    fn cli_timeout_beats_config_timeout() {
        let loaded = LoadedConfig {
            path: None,
            config: ShipcheckConfig {
                default_timeout: Some(90),
                ..Default::default()
            },
        };

        let from_config = RunnerConfig::resolve(Path::new("/repo"), &loaded, None);
        assert_eq!(from_config.default_timeout, Some(Duration::from_secs(90)));

        let from_cli = RunnerConfig::resolve(Path::new("/repo"), &loaded, Some(5));
        assert_eq!(from_cli.default_timeout, Some(Duration::from_secs(5)));
    }
}
