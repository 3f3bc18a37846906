//! Asset types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AssetId, UserId};
use super::maintenance_log::MaintenanceLog;
use super::schedule::MaintenanceSchedule;

/// A physical asset owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asset creation input
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub name: String,
    pub description: Option<String>,
}

/// Partial asset update
#[derive(Debug, Clone, Default)]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl AssetUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Maintenance counters for a single asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    /// Number of maintenance logs
    pub total_maintenance: i64,
    pub completed_maintenance: i64,
    pub pending_maintenance: i64,
    /// Sum of log costs, zero when no log has a cost
    pub total_cost: f64,
    pub total_schedules: i64,
}

/// An asset with its full maintenance history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetOverview {
    pub asset: Asset,
    pub logs: Vec<MaintenanceLog>,
    pub schedules: Vec<MaintenanceSchedule>,
    pub statistics: AssetStatistics,
}
