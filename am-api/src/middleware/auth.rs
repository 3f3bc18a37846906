//! JWT Authentication Middleware
//!
//! Tokens are HS256 JWTs whose subject is the numeric user id. Browsers
//! carry them in the `token` cookie; other clients may send
//! `Authorization: Bearer <token>` instead.

use am_core::store::UserStore;
use am_core::{MaintenanceError, User, UserId, TOKEN_COOKIE_NAME};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ErrorResponse;
use crate::state::AppState;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HS256
    pub secret: String,
    /// Algorithm to use
    pub algorithm: Algorithm,
    /// Token lifetime, also used as the cookie `Max-Age`
    pub token_ttl_secs: u64,
    /// Whether the session cookie is marked `Secure`
    pub secure_cookies: bool,
}

/// Error type for JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfigError {
    pub message: String,
}

impl std::fmt::Display for JwtConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JWT config error: {}", self.message)
    }
}

impl std::error::Error for JwtConfigError {}

impl JwtConfig {
    /// Minimum secret length for security
    const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new JWT config with secret (fallible)
    ///
    /// # Returns
    /// Error if the secret is shorter than 32 bytes.
    pub fn try_new(secret: impl Into<String>) -> Result<Self, JwtConfigError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtConfigError {
                message: format!(
                    "JWT secret must be at least {} bytes. Got {} bytes.",
                    Self::MIN_SECRET_LENGTH,
                    secret.len()
                ),
            });
        }
        Ok(Self {
            secret,
            algorithm: Algorithm::HS256,
            token_ttl_secs: am_core::DEFAULT_TOKEN_TTL_SECS,
            secure_cookies: false,
        })
    }

    pub fn with_ttl(mut self, token_ttl_secs: u64) -> Self {
        self.token_ttl_secs = token_ttl_secs;
        self
    }

    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// Session cookie carrying `token`
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.token_ttl_secs).unwrap_or(i64::MAX);
        Cookie::build((TOKEN_COOKIE_NAME, token))
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::seconds(max_age))
            .build()
    }

    /// Already-expired cookie that overwrites the session cookie
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE_NAME, ""))
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::ZERO)
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    pub iat: u64,
}

impl AuthClaims {
    pub fn new(user_id: UserId, ttl_secs: u64) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        Self {
            sub: user_id.to_string(),
            exp: now.saturating_add(ttl_secs),
            iat: now,
        }
    }

    /// Get the user ID from subject
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| AuthError::ValidationFailed("Invalid token subject".to_string()))
    }
}

/// The authenticated user, inserted into request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> UserId {
        self.0.id
    }
}

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    /// No cookie and no authorization header
    MissingToken,
    /// Invalid authorization header format
    InvalidTokenFormat,
    /// Token validation failed
    ValidationFailed(String),
    /// Token expired
    TokenExpired,
    /// Token is valid but its user no longer exists
    UserNotFound,
    /// User lookup failed
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Authentication token is required".to_string(),
            ),
            AuthError::InvalidTokenFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN_FORMAT",
                "Invalid authorization header format. Expected: Bearer <token>".to_string(),
            ),
            AuthError::ValidationFailed(msg) => {
                (StatusCode::UNAUTHORIZED, "TOKEN_VALIDATION_FAILED", msg)
            }
            AuthError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token has expired".to_string(),
            ),
            AuthError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            AuthError::Internal(msg) => {
                tracing::error!(error = %msg, "User lookup failed during authentication");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// Extract the token from a `Bearer` authorization header
pub fn extract_token(auth_header: &str) -> Result<&str, AuthError> {
    auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidTokenFormat)
}

/// Find the token in the `token` cookie, falling back to the authorization header
pub fn token_from_headers(headers: &HeaderMap) -> Result<String, AuthError> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Ok(cookie.value().to_string());
        }
    }

    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;
    extract_token(auth_header).map(str::to_string)
}

/// Sign a token for `user_id`
pub fn issue_token(user_id: UserId, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AuthClaims::new(user_id, config.token_ttl_secs);
    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<AuthClaims, AuthError> {
    let mut validation = Validation::new(config.algorithm);
    validation.validate_exp = true;
    validation.leeway = 0;

    let key = DecodingKey::from_secret(config.secret.as_bytes());

    let token_data = decode::<AuthClaims>(token, &key, &validation).map_err(|e| {
        if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
            AuthError::TokenExpired
        } else {
            AuthError::ValidationFailed(e.to_string())
        }
    })?;

    Ok(token_data.claims)
}

/// Resolve a token to its user, re-reading the user row
pub async fn authenticate(state: &AppState, token: &str) -> Result<User, AuthError> {
    let claims = validate_token(token, &state.jwt)?;
    let user_id = claims.user_id()?;

    match state.users.get_user(user_id).await {
        Ok(user) => Ok(user),
        Err(MaintenanceError::NotFound(_)) => Err(AuthError::UserNotFound),
        Err(e) => Err(AuthError::Internal(e.to_string())),
    }
}

/// Require authentication middleware
///
/// Validates the token, loads the user and stores it in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = token_from_headers(request.headers())?;
    let user = authenticate(&state, &token).await?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
