//! Maintenance schedule types
//!
//! A schedule is due either on a date, on a free-text condition
//! ("every 10 000 km"), or both. It starts pending and becomes completed
//! once linked to the maintenance log that fulfilled it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AssetId, LogId, ScheduleId};
use super::maintenance_log::MaintenanceLog;

/// A planned maintenance service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    pub id: ScheduleId,
    pub asset_id: AssetId,
    /// Name of the parent asset, joined in on reads
    pub asset_name: String,
    /// Log that fulfilled this schedule
    pub log_id: Option<LogId>,
    pub service_name: String,
    pub due_date: Option<NaiveDate>,
    pub due_condition: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceSchedule {
    pub fn is_pending(&self) -> bool {
        !self.is_completed
    }

    /// Pending with a due date strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date.is_some_and(|due| due < today)
    }
}

/// Schedule creation input
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub asset_id: AssetId,
    pub service_name: String,
    pub due_date: Option<NaiveDate>,
    pub due_condition: Option<String>,
    pub is_completed: bool,
    pub log_id: Option<LogId>,
}

/// Partial schedule update
///
/// The nullable columns use `Option<Option<_>>`: the outer `None` leaves the
/// column untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub service_name: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub due_condition: Option<Option<String>>,
    pub is_completed: Option<bool>,
    pub log_id: Option<Option<LogId>>,
}

impl ScheduleUpdate {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.due_date.is_none()
            && self.due_condition.is_none()
            && self.is_completed.is_none()
            && self.log_id.is_none()
    }
}

/// How a pending schedule gets completed
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleCompletion {
    /// Link a log the caller already recorded
    LinkLog(LogId),
    /// Record a new log for the schedule's asset and link it, atomically
    RecordLog {
        service_date: NaiveDate,
        description: Option<String>,
        cost: f64,
    },
}

/// Result of a completion: the updated schedule and the linked log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedSchedule {
    pub schedule: MaintenanceSchedule,
    pub log: MaintenanceLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(due_date: Option<NaiveDate>, is_completed: bool) -> MaintenanceSchedule {
        let now = Utc::now();
        MaintenanceSchedule {
            id: ScheduleId(1),
            asset_id: AssetId(1),
            asset_name: "Truck".to_string(),
            log_id: None,
            service_name: "Oil change".to_string(),
            due_date,
            due_condition: None,
            is_completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

        assert!(schedule(Some(yesterday), false).is_overdue(today));
        assert!(!schedule(Some(today), false).is_overdue(today));
        assert!(!schedule(Some(yesterday), true).is_overdue(today));
        assert!(!schedule(None, false).is_overdue(today));
    }

    #[test]
    fn test_update_is_empty() {
        assert!(ScheduleUpdate::default().is_empty());
        let clear_date = ScheduleUpdate {
            due_date: Some(None),
            ..Default::default()
        };
        assert!(!clear_date.is_empty());
    }
}
