//! Database error types

use am_core::MaintenanceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Schema error: {0}")]
    Schema(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// True when the statement hit a UNIQUE constraint
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Query(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<DbError> for MaintenanceError {
    fn from(e: DbError) -> Self {
        match e {
            e if e.is_unique_violation() => {
                MaintenanceError::AlreadyExists("Record".to_string())
            }
            e => MaintenanceError::Storage(e.to_string()),
        }
    }
}
