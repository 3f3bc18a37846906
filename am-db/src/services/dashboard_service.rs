//! Dashboard aggregation over one owner's assets, schedules and logs

use am_core::store::{DashboardSource, MaintenanceLogStore};
use am_core::{
    DashboardSummary, MaintenanceResult, MaintenanceStats, UserId, DASHBOARD_RECENT_LIMIT,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

use crate::repos::MaintenanceDatabase;
use crate::services::MaintenanceLogService;

pub struct DashboardService {
    database: Arc<MaintenanceDatabase>,
    logs: MaintenanceLogService,
}

impl DashboardService {
    pub fn new(database: Arc<MaintenanceDatabase>) -> Self {
        let logs = MaintenanceLogService::new(database.clone());
        Self { database, logs }
    }
}

#[async_trait]
impl DashboardSource for DashboardService {
    async fn dashboard(&self, owner: UserId, today: NaiveDate) -> MaintenanceResult<DashboardSummary> {
        let db = &self.database;

        let recent_assets = db.assets.recent(owner, Some(DASHBOARD_RECENT_LIMIT)).await?;
        let total_assets = db.assets.count_by_owner(owner).await?;
        let counts = db.schedules.counts(owner, today).await?;
        let upcoming = db.schedules.pending(owner).await?;
        let recent_logs = self.logs.recent_logs(owner, DASHBOARD_RECENT_LIMIT).await?;

        debug!(user_id = %owner, total_assets, pending = counts.pending, "Dashboard built");

        Ok(DashboardSummary {
            recent_assets: recent_assets.into_iter().map(|r| r.into_record()).collect(),
            stats: MaintenanceStats {
                total_assets,
                pending_maintenance: counts.pending,
                overdue_maintenance: counts.overdue,
                completed_maintenance: counts.completed,
            },
            upcoming: upcoming.into_iter().map(|r| r.into_record()).collect(),
            recent_logs,
        })
    }
}
