//! Error types for the Jocosa library.
//!
//! All errors are represented by the [`JocosaError`] enum, which provides
//! detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use jocosa::error::{JocosaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(JocosaError::unknown_feature("negatron"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Jocosa operations.
///
/// This enum represents all possible errors that can occur in the Jocosa
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum JocosaError {
    /// I/O errors (corpus files, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, preprocessing)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Classifier training or prediction errors
    #[error("Training error: {0}")]
    Training(String),

    /// A feature name that is not registered
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    /// The independent confusion-matrix tally disagrees with the matrix cell
    #[error(
        "Inconsistent confusion matrix: {cell} tally is {tallied} but the matrix cell holds {matrix}"
    )]
    InconsistentConfusionMatrix {
        /// Which of the four cells disagreed.
        cell: &'static str,
        /// Size of the independently tallied record group.
        tallied: usize,
        /// Value of the corresponding matrix cell.
        matrix: usize,
    },

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with JocosaError.
pub type Result<T> = std::result::Result<T, JocosaError>;

impl JocosaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        JocosaError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        JocosaError::Storage(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        JocosaError::Training(msg.into())
    }

    /// Create a new unknown-feature error.
    pub fn unknown_feature<S: Into<String>>(name: S) -> Self {
        JocosaError::UnknownFeature(name.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        JocosaError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        JocosaError::Other(msg.into())
    }
}
