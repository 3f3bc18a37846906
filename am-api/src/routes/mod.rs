//! API route handlers

pub mod asset;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod maintenance_log;
pub mod schedule;
pub mod user;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::middleware::require_auth;
use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::ready_check))
        // Session endpoints
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        // Registration
        .route("/users", post(user::register));

    let protected = Router::new()
        .route("/auth/check-token", get(auth::check_token))
        // Own account
        .route(
            "/users/me",
            get(user::get_me).put(user::update_me).delete(user::delete_me),
        )
        // Asset endpoints
        .route("/assets", get(asset::list_assets).post(asset::create_asset))
        .route(
            "/assets/:id",
            get(asset::get_asset)
                .put(asset::update_asset)
                .delete(asset::delete_asset),
        )
        .route("/assets/:id/with-maintenance", get(asset::get_asset_overview))
        // Maintenance log endpoints
        .route(
            "/maintenance-logs",
            get(maintenance_log::list_logs).post(maintenance_log::create_log),
        )
        .route(
            "/maintenance-logs/asset/:asset_id",
            get(maintenance_log::list_logs_by_asset),
        )
        .route(
            "/maintenance-logs/:id",
            get(maintenance_log::get_log)
                .put(maintenance_log::update_log)
                .delete(maintenance_log::delete_log),
        )
        // Maintenance schedule endpoints
        .route(
            "/maintenance-schedules",
            get(schedule::list_schedules).post(schedule::create_schedule),
        )
        .route("/maintenance-schedules/pending", get(schedule::pending_schedules))
        .route(
            "/maintenance-schedules/asset/:asset_id",
            get(schedule::list_schedules_by_asset),
        )
        .route(
            "/maintenance-schedules/:id",
            get(schedule::get_schedule)
                .put(schedule::update_schedule)
                .delete(schedule::delete_schedule),
        )
        .route(
            "/maintenance-schedules/:id/complete",
            patch(schedule::complete_schedule),
        )
        // Dashboard
        .route("/dashboard", get(dashboard::get_dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}
