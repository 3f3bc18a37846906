//! Maintenance schedule endpoints

use am_core::store::ScheduleStore;
use am_core::{AssetId, ScheduleId};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::dto::{
    CompleteScheduleRequest, CompleteScheduleResponse, CreateScheduleRequest,
    ScheduleListParams, ScheduleResponse, UpdateScheduleRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::CurrentUser;
use crate::state::AppState;

fn to_responses(schedules: Vec<am_core::MaintenanceSchedule>) -> Vec<ScheduleResponse> {
    schedules.into_iter().map(Into::into).collect()
}

pub async fn create_schedule(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(req): ApiJson<CreateScheduleRequest>,
) -> ApiResult<(StatusCode, Json<ScheduleResponse>)> {
    let input = req.into_input()?;
    let schedule = state.schedules.create_schedule(current.id(), input).await?;
    Ok((StatusCode::CREATED, Json(schedule.into())))
}

/// List schedules; completed ones only with `includeCompleted=true`
pub async fn list_schedules(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiQuery(params): ApiQuery<ScheduleListParams>,
) -> ApiResult<Json<Vec<ScheduleResponse>>> {
    let schedules = state
        .schedules
        .list_schedules(current.id(), params.include_completed)
        .await?;
    Ok(Json(to_responses(schedules)))
}

pub async fn pending_schedules(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ScheduleResponse>>> {
    let schedules = state.schedules.pending_schedules(current.id()).await?;
    Ok(Json(to_responses(schedules)))
}

pub async fn list_schedules_by_asset(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(asset_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<ScheduleListParams>,
) -> ApiResult<Json<Vec<ScheduleResponse>>> {
    let schedules = state
        .schedules
        .list_schedules_by_asset(current.id(), AssetId(asset_id), params.include_completed)
        .await?;
    Ok(Json(to_responses(schedules)))
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ScheduleResponse>> {
    let schedule = state
        .schedules
        .get_schedule(current.id(), ScheduleId(id))
        .await?;
    Ok(Json(schedule.into()))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateScheduleRequest>,
) -> ApiResult<Json<ScheduleResponse>> {
    let update = req.into_input()?;
    let schedule = state
        .schedules
        .update_schedule(current.id(), ScheduleId(id), update)
        .await?;
    Ok(Json(schedule.into()))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state
        .schedules
        .delete_schedule(current.id(), ScheduleId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Complete a pending schedule. An empty body records a log with defaults.
pub async fn complete_schedule(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    body: Bytes,
) -> ApiResult<Json<CompleteScheduleResponse>> {
    let req: CompleteScheduleRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CompleteScheduleRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid completion body: {e}")))?
    };
    let completion = req.into_completion(Utc::now().date_naive())?;

    let completed = state
        .schedules
        .complete_schedule(current.id(), ScheduleId(id), completion)
        .await?;

    Ok(Json(CompleteScheduleResponse {
        schedule: completed.schedule.into(),
        log: completed.log.into(),
    }))
}
