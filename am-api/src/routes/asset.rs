//! Asset endpoints

use am_core::store::AssetStore;
use am_core::AssetId;
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use crate::dto::{AssetOverviewResponse, AssetResponse, CreateAssetRequest, UpdateAssetRequest};
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Create an asset owned by the caller
pub async fn create_asset(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(req): ApiJson<CreateAssetRequest>,
) -> ApiResult<(StatusCode, Json<AssetResponse>)> {
    let asset = state
        .assets
        .create_asset(current.id(), req.into_input())
        .await?;
    Ok((StatusCode::CREATED, Json(asset.into())))
}

pub async fn list_assets(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<AssetResponse>>> {
    let assets = state.assets.list_assets(current.id()).await?;
    Ok(Json(assets.into_iter().map(Into::into).collect()))
}

pub async fn get_asset(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AssetResponse>> {
    let asset = state.assets.get_asset(current.id(), AssetId(id)).await?;
    Ok(Json(asset.into()))
}

pub async fn update_asset(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateAssetRequest>,
) -> ApiResult<Json<AssetResponse>> {
    let asset = state
        .assets
        .update_asset(current.id(), AssetId(id), req.into_input())
        .await?;
    Ok(Json(asset.into()))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.assets.delete_asset(current.id(), AssetId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Asset with its logs, schedules and maintenance statistics
pub async fn get_asset_overview(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AssetOverviewResponse>> {
    let overview = state
        .assets
        .asset_overview(current.id(), AssetId(id))
        .await?;
    Ok(Json(overview.into()))
}
