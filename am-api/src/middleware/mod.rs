//! Middleware for the API server

pub mod auth;

pub use auth::{
    extract_token, issue_token, require_auth, token_from_headers, validate_token, AuthClaims,
    AuthError, CurrentUser, JwtConfig, JwtConfigError,
};
