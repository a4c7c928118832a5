//! Store connection configuration.
//!
//! # Responsibility
//! - Describe where the element store lives and how to authenticate.
//! - Load that description from a TOML file or build it in code.
//!
//! # Invariants
//! - A validated config has a non-empty `database` and a timeout in
//!   `1..=MAX_QUERY_TIMEOUT_MS`.
//! - Configuration is fixed for the process; it is not part of the query API.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_DATABASE: &str = "PeriodicTableDB.sqlite3";
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;
/// Largest timeout SQLite's busy handler accepts (milliseconds as `i32`).
pub const MAX_QUERY_TIMEOUT_MS: u64 = i32::MAX as u64;
pub const IN_MEMORY_DATABASE: &str = ":memory:";

const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "."];

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config TOML: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Credential mode presented to the store.
///
/// TOML form: `[auth] mode = "trusted"` or
/// `[auth] mode = "password"` with `user = "..."`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AuthMode {
    /// Integrated/OS-level trust; no credentials are sent.
    #[default]
    Trusted,
    /// Named user with a password supplied out of band.
    Password { user: String },
}

impl AuthMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trusted => "trusted",
            Self::Password { .. } => "password",
        }
    }
}

/// Connection settings for the element store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub host: String,
    /// File path of the database, or `:memory:`.
    pub database: String,
    pub auth: AuthMode,
    /// Upper bound for a single `execute` call.
    pub query_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            auth: AuthMode::Trusted,
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    /// Local trusted config for a database file.
    pub fn for_database(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host cannot be empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::Invalid("database cannot be empty".to_string()));
        }
        if self.query_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.query_timeout_ms > MAX_QUERY_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "query_timeout_ms must be at most {MAX_QUERY_TIMEOUT_MS}"
            )));
        }
        if let AuthMode::Password { user } = &self.auth {
            if user.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "auth.user cannot be empty in password mode".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Whether `host` names this machine. The embedded store is only
    /// reachable locally.
    pub fn is_local_host(&self) -> bool {
        let host = self.host.trim();
        LOCAL_HOSTS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(host))
    }

    pub fn is_in_memory(&self) -> bool {
        self.database.trim() == IN_MEMORY_DATABASE
    }

    /// Timeout as a `Duration`, capped at `MAX_QUERY_TIMEOUT_MS` for
    /// configs built in code without `validate`.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms.min(MAX_QUERY_TIMEOUT_MS))
    }
}
