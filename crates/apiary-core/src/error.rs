//! Error types for Apiary Core

use thiserror::Error;

use crate::limits::ValidationError;

/// Result type alias using Apiary's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Apiary error types
///
/// A missing score is not an error: observations with no answered
/// categories assess to `Ok(None)`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid observation: {0}")]
    Validation(#[from] ValidationError),

    #[error("Next action date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
