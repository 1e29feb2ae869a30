//! Error types for the Kodama domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Kodama operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Context assembly errors ---
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    // --- Memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised by the prompt-assembly pipeline.
///
/// A missing collaborator is the only fatal condition in a build: the whole
/// invocation aborts and nothing partial is returned. Everything else in the
/// pipeline degrades to placeholder output instead of failing.
#[derive(Debug, Clone, Error)]
pub enum ContextError {
    #[error("Required collaborator not supplied: {name}")]
    MissingCollaborator { name: String },
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Profile parse failed: {0}")]
    ProfileParse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collaborator_displays_name() {
        let err = Error::Context(ContextError::MissingCollaborator {
            name: "identity".into(),
        });
        assert!(err.to_string().contains("identity"));
        assert!(err.to_string().contains("not supplied"));
    }

    #[test]
    fn memory_error_wraps() {
        let err = Error::Memory(MemoryError::Storage("disk full".into()));
        assert!(err.to_string().contains("disk full"));
    }
}
