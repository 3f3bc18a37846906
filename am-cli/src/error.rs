//! CLI error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] am_db::DbError),

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API request failed: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        CliError::ServerError {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        CliError::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigError { .. } => 1,
            CliError::DatabaseError(_) => 2,
            CliError::ServerError { .. } => 3,
            CliError::HttpError(_) => 4,
            CliError::ApiError { .. } => 5,
            CliError::JsonError(_) => 6,
        }
    }
}

impl From<am_api::JwtConfigError> for CliError {
    fn from(e: am_api::JwtConfigError) -> Self {
        CliError::config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            CliError::config("missing secret"),
            CliError::server("bind failed"),
            CliError::api(503, "unavailable"),
        ];
        let codes: Vec<i32> = errors.iter().map(CliError::exit_code).collect();
        assert_eq!(codes, vec![1, 3, 5]);
    }

    #[test]
    fn test_error_display() {
        let err = CliError::api(500, "boom");
        assert_eq!(err.to_string(), "API request failed: 500 - boom");
    }
}
