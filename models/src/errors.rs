// models/src/errors.rs

use std::io;
pub use thiserror::Error;
use uuid::Error as UuidError;
#[cfg(feature = "bincode-errors")]
use bincode::error::{DecodeError, EncodeError};
use serde_json::Error as SerdeJsonError;

#[derive(Debug, Error)]
pub enum ClinicError {
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("Invalid data provided: {0}")]
    InvalidData(String),
    #[error("An internal error occurred: {0}")]
    InternalError(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
    #[cfg(feature = "bincode-errors")]
    #[error(transparent)]
    BincodeDecode(#[from] DecodeError),
    #[cfg(feature = "bincode-errors")]
    #[error(transparent)]
    BincodeEncode(#[from] EncodeError),
    #[error("UUID parsing error: {0}")]
    Uuid(#[from] UuidError),
}

impl From<SerdeJsonError> for ClinicError {
    fn from(err: SerdeJsonError) -> Self {
        ClinicError::SerializationError(format!("JSON processing error: {}", err))
    }
}

/// A validation error raised before anything touches storage.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field was missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// An invalid value for a field was provided.
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),
    /// An invalid date format was provided.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
    /// The end of a date range precedes its start.
    #[error("end date must not precede start date")]
    InvalidDateRange,
    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHashingFailed,
    /// Password verification failed.
    #[error("password verification failed")]
    PasswordVerificationFailed,
}

/// A type alias for a `Result` that returns a `ClinicError` on failure.
pub type ClinicResult<T> = Result<T, ClinicError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
