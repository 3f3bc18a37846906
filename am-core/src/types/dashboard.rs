//! Dashboard aggregates

use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::maintenance_log::MaintenanceLog;
use super::schedule::MaintenanceSchedule;

/// Counters shown at the top of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceStats {
    pub total_assets: i64,
    pub pending_maintenance: i64,
    pub overdue_maintenance: i64,
    pub completed_maintenance: i64,
}

/// Everything the dashboard renders, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub recent_assets: Vec<Asset>,
    pub stats: MaintenanceStats,
    pub upcoming: Vec<MaintenanceSchedule>,
    pub recent_logs: Vec<MaintenanceLog>,
}
