//! Maintenance schedule row

use am_core::{AssetId, LogId, MaintenanceSchedule, ScheduleId};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Schedule row joined with its asset's name
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    pub id: i64,
    pub asset_id: i64,
    pub asset_name: String,
    pub log_id: Option<i64>,
    pub service_name: String,
    pub due_date: Option<NaiveDate>,
    pub due_condition: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleRow {
    pub const TABLE: &'static str = "maintenance_schedules";

    /// Select list over `maintenance_schedules ms JOIN assets a`
    pub const COLUMNS: &'static str = "ms.id, ms.asset_id, a.name AS asset_name, ms.log_id, \
         ms.service_name, ms.due_date, ms.due_condition, ms.is_completed, ms.created_at, ms.updated_at";

    /// Join that carries ownership; filter on `a.user_id`
    pub const FROM_OWNED: &'static str =
        "maintenance_schedules ms JOIN assets a ON ms.asset_id = a.id";

    pub fn into_record(self) -> MaintenanceSchedule {
        MaintenanceSchedule {
            id: ScheduleId(self.id),
            asset_id: AssetId(self.asset_id),
            asset_name: self.asset_name,
            log_id: self.log_id.map(LogId),
            service_name: self.service_name,
            due_date: self.due_date,
            due_condition: self.due_condition,
            is_completed: self.is_completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
