//! Maintenance log service

use am_core::store::MaintenanceLogStore;
use am_core::validation::{validate_log_update, validate_new_log};
use am_core::{
    AssetId, LogId, LogListQuery, MaintenanceError, MaintenanceLog, MaintenanceLogUpdate,
    MaintenanceResult, NewMaintenanceLog, UserId, MAX_LIST_LIMIT,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::repos::MaintenanceDatabase;

pub struct MaintenanceLogService {
    database: Arc<MaintenanceDatabase>,
}

impl MaintenanceLogService {
    pub fn new(database: Arc<MaintenanceDatabase>) -> Self {
        Self { database }
    }

    fn log_not_found(log_id: LogId) -> MaintenanceError {
        MaintenanceError::not_found(format!("Maintenance log {log_id}"))
    }

    async fn require_asset(&self, owner: UserId, asset_id: AssetId) -> MaintenanceResult<()> {
        if !self.database.assets.exists(owner, asset_id).await? {
            return Err(MaintenanceError::not_found(format!("Asset {asset_id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl MaintenanceLogStore for MaintenanceLogService {
    async fn create_log(
        &self,
        owner: UserId,
        input: NewMaintenanceLog,
    ) -> MaintenanceResult<MaintenanceLog> {
        let input = validate_new_log(input)?;
        self.require_asset(owner, input.asset_id).await?;

        let id = LogId(self.database.logs.create(&input, Utc::now()).await?);

        info!(user_id = %owner, asset_id = %input.asset_id, log_id = %id, "Maintenance log created");
        self.get_log(owner, id).await
    }

    async fn list_logs(
        &self,
        owner: UserId,
        mut query: LogListQuery,
    ) -> MaintenanceResult<Vec<MaintenanceLog>> {
        query.limit = query.limit.map(|l| l.min(MAX_LIST_LIMIT));
        let rows = self.database.logs.list(owner, &query).await?;
        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn list_logs_by_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
    ) -> MaintenanceResult<Vec<MaintenanceLog>> {
        self.require_asset(owner, asset_id).await?;
        let rows = self.database.logs.list_by_asset(owner, asset_id).await?;
        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn get_log(&self, owner: UserId, log_id: LogId) -> MaintenanceResult<MaintenanceLog> {
        self.database
            .logs
            .get(owner, log_id)
            .await?
            .map(|r| r.into_record())
            .ok_or_else(|| Self::log_not_found(log_id))
    }

    async fn update_log(
        &self,
        owner: UserId,
        log_id: LogId,
        update: MaintenanceLogUpdate,
    ) -> MaintenanceResult<MaintenanceLog> {
        let update = validate_log_update(update)?;

        if !self.database.logs.exists(owner, log_id).await? {
            return Err(Self::log_not_found(log_id));
        }
        // Moving a log is only allowed onto another asset of the same owner
        if let Some(asset_id) = update.asset_id {
            self.require_asset(owner, asset_id).await?;
        }

        let changed = self
            .database
            .logs
            .update(owner, log_id, &update, Utc::now())
            .await?;
        if changed == 0 {
            return Err(Self::log_not_found(log_id));
        }

        info!(user_id = %owner, log_id = %log_id, "Maintenance log updated");
        self.get_log(owner, log_id).await
    }

    async fn delete_log(&self, owner: UserId, log_id: LogId) -> MaintenanceResult<()> {
        if self.database.logs.delete(owner, log_id).await? == 0 {
            return Err(Self::log_not_found(log_id));
        }
        info!(user_id = %owner, log_id = %log_id, "Maintenance log deleted");
        Ok(())
    }
}
