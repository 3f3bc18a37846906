//! Asset service

use am_core::store::AssetStore;
use am_core::validation::{validate_asset_update, validate_new_asset};
use am_core::{
    Asset, AssetId, AssetOverview, AssetUpdate, MaintenanceError, MaintenanceResult, NewAsset,
    UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::repos::MaintenanceDatabase;

pub struct AssetService {
    database: Arc<MaintenanceDatabase>,
}

impl AssetService {
    pub fn new(database: Arc<MaintenanceDatabase>) -> Self {
        Self { database }
    }

    fn asset_not_found(asset_id: AssetId) -> MaintenanceError {
        MaintenanceError::not_found(format!("Asset {asset_id}"))
    }
}

#[async_trait]
impl AssetStore for AssetService {
    async fn create_asset(&self, owner: UserId, input: NewAsset) -> MaintenanceResult<Asset> {
        let input = validate_new_asset(input)?;
        let row = self.database.assets.insert(owner, &input, Utc::now()).await?;

        info!(user_id = %owner, asset_id = row.id, "Asset created");
        Ok(row.into_record())
    }

    async fn list_assets(&self, owner: UserId) -> MaintenanceResult<Vec<Asset>> {
        let rows = self.database.assets.list_by_owner(owner).await?;
        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    async fn get_asset(&self, owner: UserId, asset_id: AssetId) -> MaintenanceResult<Asset> {
        self.database
            .assets
            .get(owner, asset_id)
            .await?
            .map(|r| r.into_record())
            .ok_or_else(|| Self::asset_not_found(asset_id))
    }

    async fn update_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
        update: AssetUpdate,
    ) -> MaintenanceResult<Asset> {
        let update = validate_asset_update(update)?;

        let row = self
            .database
            .assets
            .update(owner, asset_id, &update, Utc::now())
            .await?
            .ok_or_else(|| Self::asset_not_found(asset_id))?;

        info!(user_id = %owner, asset_id = %asset_id, "Asset updated");
        Ok(row.into_record())
    }

    async fn delete_asset(&self, owner: UserId, asset_id: AssetId) -> MaintenanceResult<()> {
        if self.database.assets.delete(owner, asset_id).await? == 0 {
            return Err(Self::asset_not_found(asset_id));
        }
        info!(user_id = %owner, asset_id = %asset_id, "Asset deleted");
        Ok(())
    }

    async fn asset_overview(
        &self,
        owner: UserId,
        asset_id: AssetId,
    ) -> MaintenanceResult<AssetOverview> {
        let asset = self.get_asset(owner, asset_id).await?;

        let logs = self.database.logs.list_by_asset(owner, asset_id).await?;
        let schedules = self
            .database
            .schedules
            .all_for_asset(owner, asset_id)
            .await?;
        let statistics = self.database.assets.statistics(asset_id).await?;

        Ok(AssetOverview {
            asset,
            logs: logs.into_iter().map(|r| r.into_record()).collect(),
            schedules: schedules.into_iter().map(|r| r.into_record()).collect(),
            statistics,
        })
    }
}
