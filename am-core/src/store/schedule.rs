//! Schedule Store - planned maintenance
//!
//! Completion is the one state transition in the system: a pending
//! schedule becomes completed and gains a `log_id`. When the log is recorded
//! as part of completion both writes commit together or not at all.

use async_trait::async_trait;

use crate::error::MaintenanceResult;
use crate::types::{
    AssetId, CompletedSchedule, MaintenanceSchedule, NewSchedule, ScheduleCompletion, ScheduleId,
    ScheduleUpdate, UserId,
};

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn create_schedule(
        &self,
        owner: UserId,
        input: NewSchedule,
    ) -> MaintenanceResult<MaintenanceSchedule>;

    /// Every schedule of the owner, pending first
    async fn list_schedules(
        &self,
        owner: UserId,
        include_completed: bool,
    ) -> MaintenanceResult<Vec<MaintenanceSchedule>>;

    /// Pending schedules, earliest due date first
    async fn pending_schedules(&self, owner: UserId) -> MaintenanceResult<Vec<MaintenanceSchedule>>;

    async fn list_schedules_by_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
        include_completed: bool,
    ) -> MaintenanceResult<Vec<MaintenanceSchedule>>;

    async fn get_schedule(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
    ) -> MaintenanceResult<MaintenanceSchedule>;

    async fn update_schedule(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
        update: ScheduleUpdate,
    ) -> MaintenanceResult<MaintenanceSchedule>;

    async fn delete_schedule(&self, owner: UserId, schedule_id: ScheduleId) -> MaintenanceResult<()>;

    /// Move a pending schedule to completed, linking or recording its log
    async fn complete_schedule(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
        completion: ScheduleCompletion,
    ) -> MaintenanceResult<CompletedSchedule>;
}
