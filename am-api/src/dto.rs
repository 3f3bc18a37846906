//! API Data Transfer Objects
//!
//! Request bodies are parsed here and converted into `am-core` inputs with
//! `into_input`, which also parses dates. Responses keep the snake_case
//! field names of the stored rows; aggregate views use camelCase keys.

use am_core::validation::parse_date;
use am_core::{
    Asset, AssetId, AssetOverview, AssetStatistics, AssetUpdate, DashboardSummary, LogId,
    MaintenanceError, MaintenanceLog, MaintenanceLogUpdate, MaintenanceResult,
    MaintenanceSchedule, MaintenanceStats, NewAsset, NewMaintenanceLog, NewSchedule, NewUser,
    ScheduleCompletion, ScheduleUpdate, User, UserUpdate,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguish an absent key (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn optional_date(field: &str, value: Option<&str>) -> MaintenanceResult<Option<NaiveDate>> {
    value.map(|v| parse_date(field, v)).transpose()
}

// ============ Health ============

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub database: bool,
    pub version: String,
}

// ============ Auth / Users ============

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn into_input(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

/// Login body; `username` and `email` are interchangeable identifiers
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// The identifier to look up, preferring `username`
    pub fn login_id(&self) -> Option<&str> {
        [self.username.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|id| !id.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_input(self) -> UserUpdate {
        UserUpdate {
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckTokenResponse {
    pub valid: bool,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============ Assets ============

#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateAssetRequest {
    pub fn into_input(self) -> NewAsset {
        NewAsset {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateAssetRequest {
    pub fn into_input(self) -> AssetUpdate {
        AssetUpdate {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Asset> for AssetResponse {
    fn from(asset: Asset) -> Self {
        Self {
            id: asset.id.get(),
            user_id: asset.owner_id.get(),
            name: asset.name,
            description: asset.description,
            created_at: asset.created_at,
            updated_at: asset.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatisticsResponse {
    pub total_maintenance: i64,
    pub completed_maintenance: i64,
    pub pending_maintenance: i64,
    pub total_cost: f64,
    pub total_schedules: i64,
}

impl From<AssetStatistics> for AssetStatisticsResponse {
    fn from(s: AssetStatistics) -> Self {
        Self {
            total_maintenance: s.total_maintenance,
            completed_maintenance: s.completed_maintenance,
            pending_maintenance: s.pending_maintenance,
            total_cost: s.total_cost,
            total_schedules: s.total_schedules,
        }
    }
}

/// Asset fields at the top level, plus its maintenance history
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetOverviewResponse {
    #[serde(flatten)]
    pub asset: AssetResponse,
    pub maintenance_logs: Vec<LogResponse>,
    pub maintenance_schedules: Vec<ScheduleResponse>,
    pub statistics: AssetStatisticsResponse,
}

impl From<AssetOverview> for AssetOverviewResponse {
    fn from(o: AssetOverview) -> Self {
        Self {
            asset: o.asset.into(),
            maintenance_logs: o.logs.into_iter().map(Into::into).collect(),
            maintenance_schedules: o.schedules.into_iter().map(Into::into).collect(),
            statistics: o.statistics.into(),
        }
    }
}

// ============ Maintenance logs ============

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub asset_id: i64,
    pub service_name: String,
    pub service_date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl CreateLogRequest {
    pub fn into_input(self) -> MaintenanceResult<NewMaintenanceLog> {
        Ok(NewMaintenanceLog {
            asset_id: AssetId(self.asset_id),
            service_name: self.service_name,
            service_date: parse_date("service_date", &self.service_date)?,
            description: self.description,
            cost: self.cost,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLogRequest {
    pub asset_id: Option<i64>,
    pub service_name: Option<String>,
    pub service_date: Option<String>,
    pub description: Option<String>,
    pub cost: Option<f64>,
}

impl UpdateLogRequest {
    pub fn into_input(self) -> MaintenanceResult<MaintenanceLogUpdate> {
        Ok(MaintenanceLogUpdate {
            asset_id: self.asset_id.map(AssetId),
            service_name: self.service_name,
            service_date: optional_date("service_date", self.service_date.as_deref())?,
            description: self.description,
            cost: self.cost,
        })
    }
}

/// `GET /maintenance-logs` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct LogListParams {
    #[serde(rename = "_limit")]
    pub limit: Option<u32>,
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogResponse {
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

impl From<MaintenanceLog> for LogResponse {
    fn from(log: MaintenanceLog) -> Self {
        Self {
            id: log.id.get(),
            asset_id: log.asset_id.get(),
            asset_name: log.asset_name,
            service_name: log.service_name,
            service_date: log.service_date,
            description: log.description,
            cost: log.cost,
            created_at: log.created_at,
            updated_at: log.updated_at,
        }
    }
}

// ============ Maintenance schedules ============

#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub asset_id: i64,
    pub service_name: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_condition: Option<String>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub log_id: Option<i64>,
}

impl CreateScheduleRequest {
    pub fn into_input(self) -> MaintenanceResult<NewSchedule> {
        Ok(NewSchedule {
            asset_id: AssetId(self.asset_id),
            service_name: self.service_name,
            due_date: optional_date("due_date", self.due_date.as_deref())?,
            due_condition: self.due_condition,
            is_completed: self.is_completed.unwrap_or(false),
            log_id: self.log_id.map(LogId),
        })
    }
}

/// Update body; an explicit `null` clears `due_date`, `due_condition` or `log_id`
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_condition: Option<Option<String>>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub log_id: Option<Option<i64>>,
}

impl UpdateScheduleRequest {
    pub fn into_input(self) -> MaintenanceResult<ScheduleUpdate> {
        let due_date = match self.due_date {
            Some(value) => Some(optional_date("due_date", value.as_deref())?),
            None => None,
        };
        Ok(ScheduleUpdate {
            service_name: self.service_name,
            due_date,
            due_condition: self.due_condition,
            is_completed: self.is_completed,
            log_id: self.log_id.map(|id| id.map(LogId)),
        })
    }
}

/// `GET /maintenance-schedules` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleListParams {
    #[serde(rename = "includeCompleted", default)]
    pub include_completed: bool,
}

/// Completion body: link `log_id`, or describe the log to record
#[derive(Debug, Default, Deserialize)]
pub struct CompleteScheduleRequest {
    #[serde(default)]
    pub log_id: Option<i64>,
    #[serde(default)]
    pub service_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

impl CompleteScheduleRequest {
    /// Resolve defaults; a recorded log without a date is dated `today`
    pub fn into_completion(self, today: NaiveDate) -> MaintenanceResult<ScheduleCompletion> {
        match self.log_id {
            Some(log_id) => {
                if self.service_date.is_some() || self.description.is_some() || self.cost.is_some() {
                    return Err(MaintenanceError::validation(
                        "log_id cannot be combined with service_date, description or cost",
                    ));
                }
                Ok(ScheduleCompletion::LinkLog(LogId(log_id)))
            }
            None => Ok(ScheduleCompletion::RecordLog {
                service_date: optional_date("service_date", self.service_date.as_deref())?
                    .unwrap_or(today),
                description: self.description,
                cost: self.cost.unwrap_or(0.0),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
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

impl From<MaintenanceSchedule> for ScheduleResponse {
    fn from(s: MaintenanceSchedule) -> Self {
        Self {
            id: s.id.get(),
            asset_id: s.asset_id.get(),
            asset_name: s.asset_name,
            log_id: s.log_id.map(|id| id.get()),
            service_name: s.service_name,
            due_date: s.due_date,
            due_condition: s.due_condition,
            is_completed: s.is_completed,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteScheduleResponse {
    pub schedule: ScheduleResponse,
    pub log: LogResponse,
}

// ============ Dashboard ============

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatsResponse {
    pub total_assets: i64,
    pub pending_maintenance: i64,
    pub overdue_maintenance: i64,
    pub completed_maintenance: i64,
}

impl From<MaintenanceStats> for MaintenanceStatsResponse {
    fn from(s: MaintenanceStats) -> Self {
        Self {
            total_assets: s.total_assets,
            pending_maintenance: s.pending_maintenance,
            overdue_maintenance: s.overdue_maintenance,
            completed_maintenance: s.completed_maintenance,
        }
    }
}

/// One line of the recent activity feed
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: i64,
    pub text: String,
    pub time: NaiveDate,
}

impl From<MaintenanceLog> for ActivityItem {
    fn from(log: MaintenanceLog) -> Self {
        Self {
            id: log.id.get(),
            text: format!("{} performed on {}", log.service_name, log.asset_name),
            time: log.service_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub assets: Vec<AssetResponse>,
    pub maintenance_stats: MaintenanceStatsResponse,
    pub upcoming_maintenance: Vec<ScheduleResponse>,
    pub recent_activities: Vec<ActivityItem>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(d: DashboardSummary) -> Self {
        Self {
            assets: d.recent_assets.into_iter().map(Into::into).collect(),
            maintenance_stats: d.stats.into(),
            upcoming_maintenance: d.upcoming.into_iter().map(Into::into).collect(),
            recent_activities: d.recent_logs.into_iter().map(Into::into).collect(),
        }
    }
}
