//! Session endpoints

use am_core::credentials::{verify_dummy_password, verify_password};
use am_core::store::UserStore;
use am_core::{LoginKind, MaintenanceError};
use axum::{extract::State, Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::dto::{CheckTokenResponse, LoginRequest, LoginResponse, LogoutResponse};
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::middleware::{issue_token, CurrentUser};
use crate::state::AppState;

/// Log in with username or email; sets the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let login_id = match req.login_id() {
        Some(id) if !req.password.is_empty() => id,
        _ => {
            return Err(ApiError::Validation(
                "Provide a username or email and a password".to_string(),
            ))
        }
    };

    let Some(credentials) = state
        .users
        .find_credentials(LoginKind::of(login_id), login_id)
        .await?
    else {
        verify_dummy_password(&req.password);
        return Err(MaintenanceError::InvalidCredentials.into());
    };

    if !verify_password(&req.password, &credentials.password_hash)? {
        tracing::info!(user_id = %credentials.user.id, "Rejected login with wrong password");
        return Err(MaintenanceError::InvalidCredentials.into());
    }

    let user = credentials.user;
    let token = issue_token(user.id, &state.jwt)
        .map_err(|e| ApiError::InternalError(format!("token signing failed: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok((
        jar.add(state.jwt.session_cookie(token)),
        Json(LoginResponse { user: user.into() }),
    ))
}

/// Clear the session cookie
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    (
        jar.add(state.jwt.removal_cookie()),
        Json(LogoutResponse { success: true }),
    )
}

/// Report the user behind the current token
pub async fn check_token(Extension(current): Extension<CurrentUser>) -> Json<CheckTokenResponse> {
    Json(CheckTokenResponse {
        valid: true,
        user: current.0.into(),
    })
}
