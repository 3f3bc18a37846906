//! Dashboard endpoint

use am_core::store::DashboardSource;
use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::dto::DashboardResponse;
use crate::error::ApiResult;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Recent assets, schedule counts, upcoming work and recent activity
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<DashboardResponse>> {
    let today = Utc::now().date_naive();
    let summary = state.dashboard.dashboard(current.id(), today).await?;
    Ok(Json(summary.into()))
}
