//! Dashboard aggregation

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::MaintenanceResult;
use crate::types::{DashboardSummary, UserId};

#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Summarize the owner's assets and maintenance as of `today`
    async fn dashboard(&self, owner: UserId, today: NaiveDate) -> MaintenanceResult<DashboardSummary>;
}
