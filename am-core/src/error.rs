//! Error types for the maintenance domain

use thiserror::Error;

/// Errors raised by domain operations and store implementations
#[derive(Error, Debug)]
pub enum MaintenanceError {
    /// Row absent, or owned by another user
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already in use")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Update request carried no fields to write
    #[error("No data provided for update")]
    NoChanges,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl MaintenanceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result alias for domain operations
pub type MaintenanceResult<T> = Result<T, MaintenanceError>;
