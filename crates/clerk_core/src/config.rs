//! Default locations and settings shared by the CLI and the API server.
//!
//! # Responsibility
//! - Resolve where the database and log files live when the user does not
//!   say otherwise.
//! - Hold the settings both shells resolve from flags and environment.

use crate::logging::default_log_level;
use directories::{BaseDirs, ProjectDirs};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Database file name created in the user's home directory.
pub const DB_FILE_NAME: &str = ".clerk.db";
/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "CLERK_DB";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "CLERK_LOG_LEVEL";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "CLERK_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No home directory could be determined for the current user.
    HomeDirUnavailable,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(
                f,
                "cannot determine the home directory; set {DB_PATH_ENV} and {LOG_DIR_ENV}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings common to both shells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClerkConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ClerkConfig {
    /// Builds a config from optional overrides, filling the rest with defaults.
    ///
    /// Defaults are only computed for values that were not provided, so a
    /// fully overridden config never needs a home directory.
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let db_path = match db_path {
            Some(path) => path,
            None => default_db_path()?,
        };
        let log_dir = match log_dir {
            Some(dir) => dir,
            None => default_log_dir()?,
        };
        Ok(Self {
            db_path,
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }
}

/// `~/.clerk.db`
pub fn default_db_path() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DB_FILE_NAME))
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Platform data directory for clerk, plus `logs`.
pub fn default_log_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", "", "clerk")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .ok_or(ConfigError::HomeDirUnavailable)
}
