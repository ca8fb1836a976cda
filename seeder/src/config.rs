//! Seeder configuration read from the process environment.

use std::env::{self, VarError};
use std::fmt;

use thiserror::Error;
use url::Url;

/// Variable holding the PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Optional variable pinning the fake-data RNG seed.
pub const SEED_ENV: &str = "FIXTURES_SEED";

const REDACTED: &str = "***";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable: {key}")]
    MissingVariable {
        /// Name of the variable.
        key: String,
    },
    /// A variable is set but blank.
    #[error("environment variable {key} must not be empty")]
    EmptyVariable {
        /// Name of the variable.
        key: String,
    },
    /// A variable is set but is not valid Unicode.
    #[error("environment variable {key} is not valid unicode")]
    NotUnicode {
        /// Name of the variable.
        key: String,
    },
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Reads a required environment variable.
///
/// # Errors
///
/// Returns [`ConfigError::MissingVariable`] naming `key` when it is unset,
/// [`ConfigError::EmptyVariable`] when it is blank, and
/// [`ConfigError::NotUnicode`] when it cannot be represented as a `String`.
///
/// # Examples
///
/// ```
/// use seeder::config::{ConfigError, read_env};
///
/// let error = read_env("SEEDER_DOCTEST_UNSET_VARIABLE").unwrap_err();
/// assert_eq!(
///     error,
///     ConfigError::MissingVariable {
///         key: "SEEDER_DOCTEST_UNSET_VARIABLE".to_owned()
///     }
/// );
/// ```
pub fn read_env(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyVariable {
            key: key.to_owned(),
        }),
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(ConfigError::MissingVariable {
            key: key.to_owned(),
        }),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
            key: key.to_owned(),
        }),
    }
}

/// Reads an optional variable; unset and blank both mean "not configured".
fn read_optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match read_env(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::MissingVariable { .. } | ConfigError::EmptyVariable { .. }) => Ok(None),
        Err(error) => Err(error),
    }
}

/// Everything a seeding run needs besides the CLI counts.
#[derive(Clone, PartialEq, Eq)]
pub struct SeederConfig {
    database_url: String,
    seed: Option<u64>,
}

impl SeederConfig {
    /// Builds a configuration for the given connection string.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            seed: None,
        }
    }

    /// Pins the fake-data seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads [`DATABASE_URL_ENV`] and [`SEED_ENV`] from the environment.
    ///
    /// # Errors
    ///
    /// Fails when the connection string is missing or blank, or when a seed is
    /// set but is not an unsigned 64-bit integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = read_env(DATABASE_URL_ENV)?;
        let seed = read_optional_env(SEED_ENV)?
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|error| ConfigError::InvalidValue {
                        key: SEED_ENV.to_owned(),
                        message: error.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self { database_url, seed })
    }

    /// The connection string, credentials included.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// The pinned seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The connection string with any password masked, for logs.
    ///
    /// Key/value connection strings are not parsed and are hidden entirely.
    #[must_use]
    pub fn redacted_database_url(&self) -> String {
        let Ok(mut url) = Url::parse(&self.database_url) else {
            return "<connection string>".to_owned();
        };
        if url.password().is_some() && url.set_password(Some(REDACTED)).is_err() {
            return "<connection string>".to_owned();
        }
        url.to_string()
    }
}

impl fmt::Debug for SeederConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeederConfig")
            .field("database_url", &self.redacted_database_url())
            .field("seed", &self.seed)
            .finish()
    }
}
