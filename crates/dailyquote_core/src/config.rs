//! Runtime configuration for the quote store.
//!
//! Resolution order, later wins:
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. `DAILYQUOTE_*` environment variables.
//!
//! Callers (the CLI) may apply their own overrides on top.

use crate::db::SeedPolicy;
use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "daily_quote.db";

pub const ENV_DB_PATH: &str = "DAILYQUOTE_DB_PATH";
pub const ENV_SEED_POLICY: &str = "DAILYQUOTE_SEED_POLICY";
pub const ENV_LOG_LEVEL: &str = "DAILYQUOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DAILYQUOTE_LOG_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Settings needed to construct the store and logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Single store identifier: the SQLite database file.
    pub db_path: PathBuf,
    pub seed_policy: SeedPolicy,
    pub log_level: String,
    /// File logging is enabled only when set; must be absolute.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            seed_policy: SeedPolicy::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads defaults, then `path` (when given), then process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Parses a TOML file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `DAILYQUOTE_*` overrides read through `lookup`.
    ///
    /// Blank values are ignored.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_DB_PATH) {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = read(ENV_SEED_POLICY) {
            self.seed_policy = value
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    key: ENV_SEED_POLICY,
                    message,
                })?;
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }

        Ok(self)
    }
}
