//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Runner settings in [`runner`]
//!
//! # Example
//!
//! ```
//! use shipcheck::config::{load_config, RunnerConfig};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("shipcheck.yml"), "default_timeout: 30").unwrap();
//!
//! let loaded = load_config(temp.path(), None).unwrap();
//! let runner = RunnerConfig::resolve(temp.path(), &loaded, None);
//! assert_eq!(runner.default_timeout, Some(std::time::Duration::from_secs(30)));
//! ```

pub mod loader;
pub mod runner;
pub mod schema;
pub mod validator;

pub use loader::{
    find_config_file, load_config, load_config_file, parse_config, LoadedConfig,
    CONFIG_FILE_NAMES,
};
pub use runner::{RunnerConfig, DEFAULT_TIMEOUT};
pub use schema::{CheckConfig, ShipcheckConfig, SuiteConfig};
pub use validator::{validate, validate_config, ValidationError};
