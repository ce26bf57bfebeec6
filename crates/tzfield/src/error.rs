//! Error types for tzfield operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TzFieldError {
    #[error("Unknown timezone: '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid default timezone: {0}")]
    InvalidDefaultProvider(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TzFieldError>;
