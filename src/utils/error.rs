//! Error types for the conversion service.
//!
//! Provides the service-wide error type using `thiserror` for ergonomic error
//! handling. Handlers collapse every variant into the uniform
//! `{"success":false}` wire reply; the detail carried here is for logs only.

use std::io;
use thiserror::Error;

/// Main error type for the conversion service.
///
/// All errors in the decode/resize/encode/serialize chain and in the image
/// store are converted to this type before reaching a handler boundary.
#[derive(Error, Debug)]
pub enum OptimizerError {
    /// A form field was missing or failed typed parsing
    #[error("Field error: {0}")]
    Field(String),

    /// Source bytes could not be decoded as an image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image processing failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// Re-encoding to the target format failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Persisting or rehydrating the image store failed
    #[error("Store error: {0}")]
    Store(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for service operations.
pub type OptimizerResult<T> = Result<T, OptimizerError>;

// Helper methods for error creation
impl OptimizerError {
    pub fn field<T: Into<String>>(msg: T) -> Self {
        Self::Field(msg.into())
    }

    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn store<T: Into<String>>(msg: T) -> Self {
        Self::Store(msg.into())
    }
}

// Convert std::io::Error to OptimizerError
impl From<io::Error> for OptimizerError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}
