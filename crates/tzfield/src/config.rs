//! Synchronizer configuration.

use std::env;

use serde::Deserialize;

use crate::error::{Result, TzFieldError};
use crate::timezone::{ChronoTzDatabase, TimezoneDatabase, UTC_NAME};

/// Environment variable read by [`SyncConfig::from_env`].
pub const DEFAULT_TIMEZONE_ENV: &str = "TZFIELD_TIME_ZONE";

/// Process-wide settings handed to a [`Synchronizer`](crate::Synchronizer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    default_timezone: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_timezone: UTC_NAME.to_string(),
        }
    }
}

impl SyncConfig {
    /// Build a config whose fallback zone is `default_timezone`.
    ///
    /// # Errors
    /// Returns [`TzFieldError::Config`] if the name is not a known zone.
    pub fn new(default_timezone: impl Into<String>) -> Result<Self> {
        let default_timezone = default_timezone.into();
        ChronoTzDatabase
            .resolve(&default_timezone)
            .map_err(|e| TzFieldError::Config(e.to_string()))?;
        Ok(Self { default_timezone })
    }

    /// Read [`DEFAULT_TIMEZONE_ENV`], defaulting to `UTC` when unset or blank.
    pub fn from_env() -> Result<Self> {
        match env::var(DEFAULT_TIMEZONE_ENV) {
            Ok(name) if !name.trim().is_empty() => Self::new(name.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_timezone(&self) -> &str {
        &self.default_timezone
    }
}
