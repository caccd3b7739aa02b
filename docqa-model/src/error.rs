//! Error types for the `docqa-model` crate.

use thiserror::Error;

/// Errors that can occur when talking to a chat model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A configuration or credential problem detected before any request.
    #[error("Model configuration error: {0}")]
    Config(String),

    /// The completion request failed.
    #[error("Completion error ({provider}): {message}")]
    Completion {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
