//! Common error types for MCTiers

use thiserror::Error;

/// Common result type for MCTiers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the MCTiers services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Player name already taken (case-insensitive)
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Reorder request failed validation; nothing was applied
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Optimistic-version mismatch on a manual-order write
    #[error("Version conflict: expected version {expected}, store is at {current}")]
    Conflict { expected: i64, current: i64 },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
