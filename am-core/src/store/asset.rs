//! Asset Store - assets owned by one user

use async_trait::async_trait;

use crate::error::MaintenanceResult;
use crate::types::{Asset, AssetId, AssetOverview, AssetUpdate, NewAsset, UserId};

#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn create_asset(&self, owner: UserId, input: NewAsset) -> MaintenanceResult<Asset>;

    /// All assets of the owner, newest first
    async fn list_assets(&self, owner: UserId) -> MaintenanceResult<Vec<Asset>>;

    async fn get_asset(&self, owner: UserId, asset_id: AssetId) -> MaintenanceResult<Asset>;

    async fn update_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
        update: AssetUpdate,
    ) -> MaintenanceResult<Asset>;

    /// Delete an asset along with its logs and schedules
    async fn delete_asset(&self, owner: UserId, asset_id: AssetId) -> MaintenanceResult<()>;

    /// Asset with its logs, schedules and statistics
    async fn asset_overview(
        &self,
        owner: UserId,
        asset_id: AssetId,
    ) -> MaintenanceResult<AssetOverview>;
}
