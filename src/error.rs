//! Error types for the Tagbayes library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TagbayesError`] enum. Variants carry a human-readable message and come
//! with constructor helpers so call sites stay short.
//!
//! # Examples
//!
//! ```
//! use tagbayes::error::{Result, TagbayesError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TagbayesError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Tagbayes operations.
#[derive(Error, Debug)]
pub enum TagbayesError {
    /// I/O errors (model files, training files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tag that an operation requires does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input handed to a tokenizer has an unsupported shape
    #[error("Format error: {0}")]
    Format(String),

    /// An argument is outside the domain of the operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Analysis-related errors (tokenizer construction, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TagbayesError.
pub type Result<T> = std::result::Result<T, TagbayesError>;

impl TagbayesError {
    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TagbayesError::NotFound(msg.into())
    }

    /// Create a new format error.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        TagbayesError::Format(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TagbayesError::InvalidArgument(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TagbayesError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TagbayesError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TagbayesError::Other(msg.into())
    }
}
