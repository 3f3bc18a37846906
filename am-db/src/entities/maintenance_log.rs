//! Maintenance log row

use am_core::{AssetId, LogId, MaintenanceLog};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Log row joined with its asset's name
#[derive(Debug, Clone, FromRow)]
pub struct LogRow {
    pub id: i64,
    pub asset_id: i64,
    pub asset_name: String,
    pub service_name: String,
    pub service_date: NaiveDate,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LogRow {
    pub const TABLE: &'static str = "maintenance_logs";

    /// Select list over `maintenance_logs ml JOIN assets a`
    pub const COLUMNS: &'static str = "ml.id, ml.asset_id, a.name AS asset_name, ml.service_name, \
         ml.service_date, ml.description, ml.cost, ml.created_at, ml.updated_at";

    /// Join that carries ownership; filter on `a.user_id`
    pub const FROM_OWNED: &'static str =
        "maintenance_logs ml JOIN assets a ON ml.asset_id = a.id";

    pub fn into_record(self) -> MaintenanceLog {
        MaintenanceLog {
            id: LogId(self.id),
            asset_id: AssetId(self.asset_id),
            asset_name: self.asset_name,
            service_name: self.service_name,
            service_date: self.service_date,
            description: self.description,
            cost: self.cost,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
