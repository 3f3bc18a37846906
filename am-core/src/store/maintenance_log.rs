//! Log Store - completed maintenance services

use async_trait::async_trait;

use crate::error::MaintenanceResult;
use crate::types::{
    AssetId, LogId, LogListQuery, MaintenanceLog, MaintenanceLogUpdate, NewMaintenanceLog, UserId,
};

#[async_trait]
pub trait MaintenanceLogStore: Send + Sync {
    /// Record a log against one of the owner's assets
    async fn create_log(
        &self,
        owner: UserId,
        input: NewMaintenanceLog,
    ) -> MaintenanceResult<MaintenanceLog>;

    async fn list_logs(
        &self,
        owner: UserId,
        query: LogListQuery,
    ) -> MaintenanceResult<Vec<MaintenanceLog>>;

    /// Logs of one asset, most recent service first
    async fn list_logs_by_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
    ) -> MaintenanceResult<Vec<MaintenanceLog>>;

    /// Most recently recorded logs
    async fn recent_logs(&self, owner: UserId, limit: u32) -> MaintenanceResult<Vec<MaintenanceLog>> {
        self.list_logs(
            owner,
            LogListQuery {
                limit: Some(limit),
                ..Default::default()
            },
        )
        .await
    }

    async fn get_log(&self, owner: UserId, log_id: LogId) -> MaintenanceResult<MaintenanceLog>;

    async fn update_log(
        &self,
        owner: UserId,
        log_id: LogId,
        update: MaintenanceLogUpdate,
    ) -> MaintenanceResult<MaintenanceLog>;

    async fn delete_log(&self, owner: UserId, log_id: LogId) -> MaintenanceResult<()>;
}
