//! Maintenance log endpoints

use am_core::store::MaintenanceLogStore;
use am_core::{AssetId, LogId, LogListQuery};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use crate::dto::{CreateLogRequest, LogListParams, LogResponse, UpdateLogRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Record a maintenance log on one of the caller's assets
pub async fn create_log(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(req): ApiJson<CreateLogRequest>,
) -> ApiResult<(StatusCode, Json<LogResponse>)> {
    let input = req.into_input()?;
    let log = state.logs.create_log(current.id(), input).await?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

/// List logs; unknown `_sort` values fall back to newest first
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(params): ApiQuery<LogListParams>,
) -> ApiResult<Json<Vec<LogResponse>>> {
    let query = LogListQuery::from_params(
        params.limit,
        params.sort.as_deref(),
        params.order.as_deref(),
    );
    let logs = state.logs.list_logs(current.id(), query).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

pub async fn list_logs_by_asset(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(asset_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<LogResponse>>> {
    let logs = state
        .logs
        .list_logs_by_asset(current.id(), AssetId(asset_id))
        .await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

pub async fn get_log(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<LogResponse>> {
    let log = state.logs.get_log(current.id(), LogId(id)).await?;
    Ok(Json(log.into()))
}

pub async fn update_log(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateLogRequest>,
) -> ApiResult<Json<LogResponse>> {
    let update = req.into_input()?;
    let log = state
        .logs
        .update_log(current.id(), LogId(id), update)
        .await?;
    Ok(Json(log.into()))
}

pub async fn delete_log(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.logs.delete_log(current.id(), LogId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
