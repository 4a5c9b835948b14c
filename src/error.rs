//! Error types for Agora backend operations.

use thiserror::Error;

/// Result type alias for Agora backend operations.
pub type Result<T> = std::result::Result<T, AgoraError>;

/// Main error type for Agora backend operations.
#[derive(Error, Debug)]
pub enum AgoraError {
    /// Database query errors, wrapped with request context
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors from artifact reads and writes
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entity kind strings the response generator does not recognize
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgoraError {
    /// Creates a new database error.
    pub fn database<T: ToString>(msg: T) -> Self {
        Self::Database(msg.to_string())
    }

    /// Creates a new serialization error.
    pub fn serialization<T: ToString>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Creates a new configuration error.
    pub fn config<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }
}
