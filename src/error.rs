//! Error types for the smart-speller library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpellerError`] enum. Only initialization (corpus loading, configuration)
//! can fail: lookups, expansions and scoring are total once a speller exists.
//!
//! # Examples
//!
//! ```
//! use smart_speller::error::{Result, SpellerError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpellerError::invalid_argument("empty word"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for smart-speller operations.
#[derive(Error, Debug)]
pub enum SpellerError {
    /// I/O errors (corpus or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Corpus content errors, e.g. a corpus that yields no words
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpellerError.
pub type Result<T> = std::result::Result<T, SpellerError>;

impl SpellerError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        SpellerError::Corpus(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SpellerError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpellerError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpellerError::Other(msg.into())
    }
}
