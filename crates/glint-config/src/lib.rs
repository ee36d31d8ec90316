//! Configuration and persisted state for glint.
//!
//! Both files live under the platform directories reported by
//! [`directories::ProjectDirs`]: `config.toml` in the config dir and
//! `state.toml` in the data dir.

mod config;
mod error;
mod state;

pub use config::{Config, DEFAULT_ICONS};
pub use error::ConfigError;
pub use state::FileStore;

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "glint").ok_or(ConfigError::NoHomeDir)
}

/// Path of the user configuration file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Path of the key-value state file.
pub fn state_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().join("state.toml"))
}

/// Path of the log file.
pub fn log_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().join("glint.log"))
}
