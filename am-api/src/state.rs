//! Application state for the API server

use am_db::{
    AssetService, DashboardService, DbResult, MaintenanceDatabase, MaintenanceLogService,
    ScheduleService, UserService,
};
use std::sync::Arc;

use crate::middleware::JwtConfig;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Shared database handle, used for readiness checks
    pub database: Arc<MaintenanceDatabase>,
    pub users: Arc<UserService>,
    pub assets: Arc<AssetService>,
    pub logs: Arc<MaintenanceLogService>,
    pub schedules: Arc<ScheduleService>,
    pub dashboard: Arc<DashboardService>,
    /// Token signing and cookie settings
    pub jwt: Arc<JwtConfig>,
    /// API version
    pub version: String,
}

impl AppState {
    /// Create new app state from database, applying the schema
    pub async fn new(database: Arc<MaintenanceDatabase>, jwt: JwtConfig) -> DbResult<Self> {
        database.init_schema().await?;

        Ok(Self {
            users: Arc::new(UserService::new(database.clone())),
            assets: Arc::new(AssetService::new(database.clone())),
            logs: Arc::new(MaintenanceLogService::new(database.clone())),
            schedules: Arc::new(ScheduleService::new(database.clone())),
            dashboard: Arc::new(DashboardService::new(database.clone())),
            database,
            jwt: Arc::new(jwt),
            version: crate::VERSION.to_string(),
        })
    }
}
