//! Configuration file discovery and loading.
//!
//! A project may carry at most one config file. It is looked up in the
//! project root under the names in [`CONFIG_FILE_NAMES`], first match wins.
//! No config file is not an error: the built-in suites still run.

use crate::config::schema::ShipcheckConfig;
use crate::config::validator::validate;
use crate::error::{Result, ShipcheckError};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for in the project root, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["shipcheck.yml", ".shipcheck.yml"];

/// A parsed config together with where it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Path of the config file (None when running on defaults).
    pub path: Option<PathBuf>,

    pub config: ShipcheckConfig,
}

impl LoadedConfig {
    /// Directory that relative paths in the config are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

/// Find the project config file, if any.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file, then validate it.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if the values are invalid.
pub fn load_config_file(path: &Path) -> Result<ShipcheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShipcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShipcheckError::Io(e)
        }
    })?;

    let config = parse_config(&content, path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse YAML content into ShipcheckConfig.
///
/// An empty file parses as the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ShipcheckConfig> {
    if content.trim().is_empty() {
        return Ok(ShipcheckConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ShipcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Otherwise the project root is searched and
/// a missing file yields the default config.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<LoadedConfig> {
    let path = match config_override {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(project_root),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let config = load_config_file(&path)?;
            Ok(LoadedConfig {
                path: Some(path),
                config,
            })
        }
        None => {
            tracing::debug!(root = %project_root.display(), "no config file, using defaults");
            Ok(LoadedConfig::default())
        }
    }
}
