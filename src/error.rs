//! Error types for chunkstream.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkStreamError {
    // Configuration errors
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidConfiguration { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Adapter errors
    #[error("Unsupported audio format: expected {expected}, got {actual}")]
    UnsupportedFormat { expected: String, actual: String },

    #[error("Adapter read failed: {message}")]
    AdapterRead { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChunkStreamError {
    /// Shorthand for construction-time validation failures.
    pub(crate) fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ChunkStreamError>;
