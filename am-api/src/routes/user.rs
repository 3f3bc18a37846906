//! User registration and own-account endpoints

use am_core::store::UserStore;
use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::dto::{RegisterRequest, UpdateUserRequest, UserResponse};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users.register(req.into_input()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(current.0.into())
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .update_user(current.id(), req.into_input())
        .await?;
    Ok(Json(user.into()))
}

/// Delete the account with everything it owns, and end the session
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, StatusCode)> {
    state.users.delete_user(current.id()).await?;
    Ok((jar.add(state.jwt.removal_cookie()), StatusCode::NO_CONTENT))
}
