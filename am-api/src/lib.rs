//! Asset Maintenance REST API
//!
//! HTTP API for the asset maintenance tracker. All routes live under `/api`.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /api/health` - Liveness
//! - `GET /api/health/ready` - Readiness (database ping)
//!
//! ## Authentication
//! - `POST /api/auth/login` - Log in, sets the `token` cookie
//! - `POST /api/auth/logout` - Clear the cookie
//! - `GET /api/auth/check-token` - Validate the session
//!
//! ## Users
//! - `POST /api/users` - Register
//! - `GET|PUT|DELETE /api/users/me` - The authenticated account
//!
//! ## Assets
//! - `GET|POST /api/assets`
//! - `GET|PUT|DELETE /api/assets/:id`
//! - `GET /api/assets/:id/with-maintenance` - Asset with logs, schedules and statistics
//!
//! ## Maintenance logs
//! - `GET|POST /api/maintenance-logs` - List accepts `_limit`, `_sort`, `_order`
//! - `GET /api/maintenance-logs/asset/:asset_id`
//! - `GET|PUT|DELETE /api/maintenance-logs/:id`
//!
//! ## Maintenance schedules
//! - `GET|POST /api/maintenance-schedules` - List accepts `includeCompleted`
//! - `GET /api/maintenance-schedules/pending`
//! - `GET /api/maintenance-schedules/asset/:asset_id`
//! - `GET|PUT|DELETE /api/maintenance-schedules/:id`
//! - `PATCH /api/maintenance-schedules/:id/complete`
//!
//! ## Dashboard
//! - `GET /api/dashboard`

pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::*;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use middleware::{AuthClaims, AuthError, CurrentUser, JwtConfig, JwtConfigError};
pub use routes::create_router;
pub use server::*;
pub use state::AppState;

use am_core::DEFAULT_TOKEN_TTL_SECS;
use am_db::DatabaseConfig;

/// API version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub bind_addr: String,
    /// Port
    pub port: u16,
    /// SQLite URL
    pub database_url: String,
    /// Pool size for file databases
    pub db_max_connections: u32,
    /// HS256 secret, at least 32 bytes
    pub jwt_secret: Option<String>,
    /// Token and cookie lifetime in seconds
    pub token_ttl_secs: u64,
    /// Origin allowed to send credentialed requests
    pub cors_origin: String,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_url: db.url,
            db_max_connections: db.max_connections,
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            cors_origin: "http://localhost:5173".to_string(),
            secure_cookies: false,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("AM_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: std::env::var("AM_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("AM_DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: std::env::var("AM_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.db_max_connections),
            jwt_secret: std::env::var("AM_JWT_SECRET").ok(),
            token_ttl_secs: std::env::var("AM_TOKEN_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.token_ttl_secs),
            cors_origin: std::env::var("AM_CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            secure_cookies: std::env::var("AM_SECURE_COOKIES")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.secure_cookies),
        }
    }

    /// Get the full bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
        }
    }

    /// Build the token configuration; fails when the secret is missing or short
    pub fn jwt_config(&self) -> Result<JwtConfig, JwtConfigError> {
        let secret = self.jwt_secret.clone().ok_or_else(|| JwtConfigError {
            message: "AM_JWT_SECRET is not set. Set it to a random value of at least 32 bytes."
                .to_string(),
        })?;
        Ok(JwtConfig::try_new(secret)?
            .with_ttl(self.token_ttl_secs)
            .with_secure_cookies(self.secure_cookies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_requires_secret() {
        let config = ServerConfig::default();
        assert!(config.jwt_config().is_err());

        let config = ServerConfig {
            jwt_secret: Some("short".to_string()),
            ..Default::default()
        };
        assert!(config.jwt_config().is_err());

        let config = ServerConfig {
            jwt_secret: Some("a-test-secret-that-is-long-enough-for-hs256".to_string()),
            token_ttl_secs: 60,
            secure_cookies: true,
            ..Default::default()
        };
        let jwt = config.jwt_config().unwrap();
        assert_eq!(jwt.token_ttl_secs, 60);
        assert!(jwt.secure_cookies);
    }

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
