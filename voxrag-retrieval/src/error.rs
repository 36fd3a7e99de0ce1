//! Error types for the `voxrag-retrieval` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
///
/// "No good match" situations are deliberately **not** represented here;
/// they are ordinary [`Retrieval`](crate::engine::Retrieval) variants,
/// because an empty or low-confidence result is an expected outcome of a
/// query, not a fault.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A chunk id collided with one already stored.
    ///
    /// Ids are random UUIDs, so this is astronomically unlikely and treated
    /// as a logic error by callers.
    #[error("duplicate chunk id: {0}")]
    DuplicateId(String),

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An error in the retrieval pipeline orchestration.
    #[error("pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
