//! Maintenance schedule service
//!
//! Besides CRUD this owns the completion workflow. Recording a new log and
//! flagging the schedule completed happen in one transaction, so a failed
//! completion never leaves a stray log behind.

use am_core::store::ScheduleStore;
use am_core::validation::{optional_text, validate_cost, validate_new_schedule, validate_schedule_update};
use am_core::{
    AssetId, CompletedSchedule, LogId, MaintenanceError, MaintenanceResult, MaintenanceSchedule,
    NewMaintenanceLog, NewSchedule, ScheduleCompletion, ScheduleId, ScheduleUpdate, UserId,
    COMPLETION_LOG_DESCRIPTION,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::entities::ScheduleRow;
use crate::error::DbError;
use crate::repos::{LogRepo, MaintenanceDatabase, ScheduleRepo};

/// What completing a schedule writes, decided before the transaction opens
enum CompletionPlan {
    Link(LogId),
    Record(NewMaintenanceLog),
}

pub struct ScheduleService {
    database: Arc<MaintenanceDatabase>,
}

impl ScheduleService {
    pub fn new(database: Arc<MaintenanceDatabase>) -> Self {
        Self { database }
    }

    fn schedule_not_found(schedule_id: ScheduleId) -> MaintenanceError {
        MaintenanceError::not_found(format!("Maintenance schedule {schedule_id}"))
    }

    fn log_not_found(log_id: LogId) -> MaintenanceError {
        MaintenanceError::not_found(format!("Maintenance log {log_id}"))
    }

    fn already_completed(schedule_id: ScheduleId) -> MaintenanceError {
        MaintenanceError::InvalidStateTransition(format!(
            "schedule {schedule_id} is already completed"
        ))
    }

    async fn require_asset(&self, owner: UserId, asset_id: AssetId) -> MaintenanceResult<()> {
        if !self.database.assets.exists(owner, asset_id).await? {
            return Err(MaintenanceError::not_found(format!("Asset {asset_id}")));
        }
        Ok(())
    }

    async fn require_log(&self, owner: UserId, log_id: LogId) -> MaintenanceResult<()> {
        if !self.database.logs.exists(owner, log_id).await? {
            return Err(Self::log_not_found(log_id));
        }
        Ok(())
    }

    fn rows_to_records(rows: Vec<ScheduleRow>) -> Vec<MaintenanceSchedule> {
        rows.into_iter().map(|r| r.into_record()).collect()
    }
}

#[async_trait]
impl ScheduleStore for ScheduleService {
    async fn create_schedule(
        &self,
        owner: UserId,
        input: NewSchedule,
    ) -> MaintenanceResult<MaintenanceSchedule> {
        let input = validate_new_schedule(input)?;
        self.require_asset(owner, input.asset_id).await?;
        if let Some(log_id) = input.log_id {
            self.require_log(owner, log_id).await?;
        }

        let id = ScheduleId(self.database.schedules.insert(&input, Utc::now()).await?);

        info!(user_id = %owner, asset_id = %input.asset_id, schedule_id = %id, "Maintenance schedule created");
        self.get_schedule(owner, id).await
    }

    async fn list_schedules(
        &self,
        owner: UserId,
        include_completed: bool,
    ) -> MaintenanceResult<Vec<MaintenanceSchedule>> {
        let rows = self.database.schedules.list(owner, include_completed).await?;
        Ok(Self::rows_to_records(rows))
    }

    async fn pending_schedules(&self, owner: UserId) -> MaintenanceResult<Vec<MaintenanceSchedule>> {
        let rows = self.database.schedules.pending(owner).await?;
        Ok(Self::rows_to_records(rows))
    }

    async fn list_schedules_by_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
        include_completed: bool,
    ) -> MaintenanceResult<Vec<MaintenanceSchedule>> {
        self.require_asset(owner, asset_id).await?;
        let rows = self
            .database
            .schedules
            .list_by_asset(owner, asset_id, include_completed)
            .await?;
        Ok(Self::rows_to_records(rows))
    }

    async fn get_schedule(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
    ) -> MaintenanceResult<MaintenanceSchedule> {
        self.database
            .schedules
            .get(owner, schedule_id)
            .await?
            .map(|r| r.into_record())
            .ok_or_else(|| Self::schedule_not_found(schedule_id))
    }

    async fn update_schedule(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
        update: ScheduleUpdate,
    ) -> MaintenanceResult<MaintenanceSchedule> {
        let update = validate_schedule_update(update)?;
        let current = self.get_schedule(owner, schedule_id).await?;

        // The schedule must stay due by date or by condition
        let due_date = update.due_date.unwrap_or(current.due_date);
        let due_condition = update
            .due_condition
            .clone()
            .unwrap_or(current.due_condition);
        if due_date.is_none() && due_condition.is_none() {
            return Err(MaintenanceError::validation(
                "a schedule needs a due_date or a due_condition",
            ));
        }

        if let Some(Some(log_id)) = update.log_id {
            self.require_log(owner, log_id).await?;
        }

        let changed = self
            .database
            .schedules
            .update(owner, schedule_id, &update, Utc::now())
            .await?;
        if changed == 0 {
            return Err(Self::schedule_not_found(schedule_id));
        }

        info!(user_id = %owner, schedule_id = %schedule_id, "Maintenance schedule updated");
        self.get_schedule(owner, schedule_id).await
    }

    async fn delete_schedule(&self, owner: UserId, schedule_id: ScheduleId) -> MaintenanceResult<()> {
        if self.database.schedules.delete(owner, schedule_id).await? == 0 {
            return Err(Self::schedule_not_found(schedule_id));
        }
        info!(user_id = %owner, schedule_id = %schedule_id, "Maintenance schedule deleted");
        Ok(())
    }

    async fn complete_schedule(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
        completion: ScheduleCompletion,
    ) -> MaintenanceResult<CompletedSchedule> {
        let schedule = self.get_schedule(owner, schedule_id).await?;
        if schedule.is_completed {
            return Err(Self::already_completed(schedule_id));
        }

        // Validate before opening the transaction
        let plan = match completion {
            ScheduleCompletion::LinkLog(log_id) => CompletionPlan::Link(log_id),
            ScheduleCompletion::RecordLog {
                service_date,
                description,
                cost,
            } => CompletionPlan::Record(NewMaintenanceLog {
                asset_id: schedule.asset_id,
                service_name: schedule.service_name.clone(),
                service_date,
                description: optional_text("description", description)?
                    .or_else(|| Some(COMPLETION_LOG_DESCRIPTION.to_string())),
                cost: Some(validate_cost(cost)?),
            }),
        };

        let now = Utc::now();
        let mut tx = self
            .database
            .pool()
            .begin()
            .await
            .map_err(DbError::from)?;

        let log_id = match plan {
            CompletionPlan::Link(log_id) => {
                if LogRepo::fetch(&mut *tx, owner, log_id).await?.is_none() {
                    return Err(Self::log_not_found(log_id));
                }
                log_id
            }
            CompletionPlan::Record(new_log) => {
                LogId(LogRepo::insert(&mut *tx, &new_log, now).await?)
            }
        };

        // Guards against a concurrent completion between the read above and now
        if ScheduleRepo::mark_completed(&mut *tx, schedule_id, log_id, now).await? == 0 {
            warn!(schedule_id = %schedule_id, "Schedule completed concurrently, rolling back");
            return Err(Self::already_completed(schedule_id));
        }

        tx.commit().await.map_err(DbError::from)?;
        info!(user_id = %owner, schedule_id = %schedule_id, log_id = %log_id, "Maintenance schedule completed");

        let schedule = self.get_schedule(owner, schedule_id).await?;
        let log = self
            .database
            .logs
            .get(owner, log_id)
            .await?
            .map(|r| r.into_record())
            .ok_or_else(|| Self::log_not_found(log_id))?;

        Ok(CompletedSchedule { schedule, log })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_asset, seed_user, test_database};
    use crate::services::MaintenanceLogService;
    use am_core::store::MaintenanceLogStore;
    use am_core::LogListQuery;
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn inspection(asset_id: AssetId, due_date: Option<NaiveDate>) -> NewSchedule {
        NewSchedule {
            asset_id,
            service_name: "Inspection".to_string(),
            due_date,
            due_condition: None,
            is_completed: false,
            log_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_due_date_or_condition() {
        let db = test_database().await;
        let owner = seed_user(&db, "alice").await;
        let truck = seed_asset(&db, owner, "Truck").await;
        let service = ScheduleService::new(db);

        let neither = service.create_schedule(owner, inspection(truck, None)).await;
        assert!(matches!(neither, Err(MaintenanceError::Validation(_))));

        let by_condition = service
            .create_schedule(
                owner,
                NewSchedule {
                    due_condition: Some("every 10000 km".to_string()),
                    ..inspection(truck, None)
                },
            )
            .await
            .unwrap();
        assert_eq!(by_condition.due_condition.as_deref(), Some("every 10000 km"));
        assert_eq!(by_condition.asset_name, "Truck");
        assert!(by_condition.is_pending());
    }

    #[tokio::test]
    async fn test_create_checks_ownership() {
        let db = test_database().await;
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let truck = seed_asset(&db, alice, "Truck").await;
        let bobs_car = seed_asset(&db, bob, "Car").await;
        let logs = MaintenanceLogService::new(db.clone());
        let service = ScheduleService::new(db);

        let foreign_asset = service
            .create_schedule(bob, inspection(truck, Some(date(1, 1))))
            .await;
        assert!(matches!(foreign_asset, Err(MaintenanceError::NotFound(_))));

        let bobs_log = logs
            .create_log(
                bob,
                NewMaintenanceLog {
                    asset_id: bobs_car,
                    service_name: "Wash".to_string(),
                    service_date: date(1, 1),
                    description: None,
                    cost: None,
                },
            )
            .await
            .unwrap();
        let foreign_log = service
            .create_schedule(
                alice,
                NewSchedule {
                    log_id: Some(bobs_log.id),
                    ..inspection(truck, Some(date(1, 1)))
                },
            )
            .await;
        assert!(matches!(foreign_log, Err(MaintenanceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_ordering_and_pending() {
        let db = test_database().await;
        let owner = seed_user(&db, "alice").await;
        let truck = seed_asset(&db, owner, "Truck").await;
        let service = ScheduleService::new(db);

        let undated = service
            .create_schedule(
                owner,
                NewSchedule {
                    due_condition: Some("when noisy".to_string()),
                    ..inspection(truck, None)
                },
            )
            .await
            .unwrap();
        let later = service
            .create_schedule(owner, inspection(truck, Some(date(9, 1))))
            .await
            .unwrap();
        let sooner = service
            .create_schedule(owner, inspection(truck, Some(date(2, 1))))
            .await
            .unwrap();
        let done = service
            .create_schedule(
                owner,
                NewSchedule {
                    is_completed: true,
                    ..inspection(truck, Some(date(1, 1)))
                },
            )
            .await
            .unwrap();

        let pending = service.pending_schedules(owner).await.unwrap();
        let ids: Vec<_> = pending.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id, undated.id]);

        let open = service.list_schedules(owner, false).await.unwrap();
        assert_eq!(open.len(), 3);

        let all = service.list_schedules(owner, true).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all.last().map(|s| s.id), Some(done.id));

        let by_asset = service
            .list_schedules_by_asset(owner, truck, false)
            .await
            .unwrap();
        let ids: Vec<_> = by_asset.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id, undated.id]);
    }

    #[tokio::test]
    async fn test_update_clears_nullable_fields() {
        let db = test_database().await;
        let owner = seed_user(&db, "alice").await;
        let truck = seed_asset(&db, owner, "Truck").await;
        let service = ScheduleService::new(db);

        let schedule = service
            .create_schedule(
                owner,
                NewSchedule {
                    due_condition: Some("at 50000 km".to_string()),
                    ..inspection(truck, Some(date(3, 1)))
                },
            )
            .await
            .unwrap();

        let cleared = service
            .update_schedule(
                owner,
                schedule.id,
                ScheduleUpdate {
                    due_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.due_date, None);
        assert_eq!(cleared.due_condition.as_deref(), Some("at 50000 km"));

        let nothing_left = service
            .update_schedule(
                owner,
                schedule.id,
                ScheduleUpdate {
                    due_condition: Some(None),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(nothing_left, Err(MaintenanceError::Validation(_))));

        let empty = service
            .update_schedule(owner, schedule.id, ScheduleUpdate::default())
            .await;
        assert!(matches!(empty, Err(MaintenanceError::NoChanges)));
    }

    #[tokio::test]
    async fn test_complete_records_log() {
        let db = test_database().await;
        let owner = seed_user(&db, "alice").await;
        let truck = seed_asset(&db, owner, "Truck").await;
        let service = ScheduleService::new(db);

        let schedule = service
            .create_schedule(owner, inspection(truck, Some(date(4, 1))))
            .await
            .unwrap();

        let completed = service
            .complete_schedule(
                owner,
                schedule.id,
                ScheduleCompletion::RecordLog {
                    service_date: date(4, 2),
                    description: None,
                    cost: 0.0,
                },
            )
            .await
            .unwrap();

        assert!(completed.schedule.is_completed);
        assert_eq!(completed.schedule.log_id, Some(completed.log.id));
        assert_eq!(completed.log.asset_id, truck);
        assert_eq!(completed.log.service_name, "Inspection");
        assert_eq!(completed.log.service_date, date(4, 2));
        assert_eq!(
            completed.log.description.as_deref(),
            Some(COMPLETION_LOG_DESCRIPTION)
        );
        assert_eq!(completed.log.cost, Some(0.0));

        let again = service
            .complete_schedule(owner, schedule.id, ScheduleCompletion::LinkLog(completed.log.id))
            .await;
        assert!(matches!(
            again,
            Err(MaintenanceError::InvalidStateTransition(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_links_existing_log() {
        let db = test_database().await;
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let truck = seed_asset(&db, alice, "Truck").await;
        let bobs_car = seed_asset(&db, bob, "Car").await;
        let logs = MaintenanceLogService::new(db.clone());
        let service = ScheduleService::new(db);

        let new_log = |asset_id| NewMaintenanceLog {
            asset_id,
            service_name: "Brake check".to_string(),
            service_date: date(6, 1),
            description: None,
            cost: Some(15.0),
        };
        let own_log = logs.create_log(alice, new_log(truck)).await.unwrap();
        let bobs_log = logs.create_log(bob, new_log(bobs_car)).await.unwrap();

        let schedule = service
            .create_schedule(alice, inspection(truck, Some(date(6, 1))))
            .await
            .unwrap();

        let foreign = service
            .complete_schedule(alice, schedule.id, ScheduleCompletion::LinkLog(bobs_log.id))
            .await;
        assert!(matches!(foreign, Err(MaintenanceError::NotFound(_))));
        assert!(service.get_schedule(alice, schedule.id).await.unwrap().is_pending());

        let completed = service
            .complete_schedule(alice, schedule.id, ScheduleCompletion::LinkLog(own_log.id))
            .await
            .unwrap();
        assert_eq!(completed.log.id, own_log.id);
        assert_eq!(completed.schedule.log_id, Some(own_log.id));
    }

    #[tokio::test]
    async fn test_failed_completion_rolls_back_log() {
        let db = test_database().await;
        let owner = seed_user(&db, "alice").await;
        let truck = seed_asset(&db, owner, "Truck").await;
        let logs = MaintenanceLogService::new(db.clone());
        let service = ScheduleService::new(db.clone());

        let schedule = service
            .create_schedule(owner, inspection(truck, Some(date(7, 1))))
            .await
            .unwrap();

        // Make the second statement of the transaction fail
        sqlx::query(
            "CREATE TRIGGER fail_completion BEFORE UPDATE OF is_completed ON maintenance_schedules \
             BEGIN SELECT RAISE(ABORT, 'completion rejected'); END;",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = service
            .complete_schedule(
                owner,
                schedule.id,
                ScheduleCompletion::RecordLog {
                    service_date: date(7, 2),
                    description: Some("Done".to_string()),
                    cost: 10.0,
                },
            )
            .await;
        assert!(matches!(result, Err(MaintenanceError::Storage(_))));

        let remaining = logs.list_logs(owner, LogListQuery::default()).await.unwrap();
        assert!(remaining.is_empty());
        assert!(service.get_schedule(owner, schedule.id).await.unwrap().is_pending());
    }

    #[tokio::test]
    async fn test_complete_foreign_schedule_is_not_found() {
        let db = test_database().await;
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let truck = seed_asset(&db, alice, "Truck").await;
        let service = ScheduleService::new(db);

        let schedule = service
            .create_schedule(alice, inspection(truck, Some(date(8, 1))))
            .await
            .unwrap();

        let result = service
            .complete_schedule(
                bob,
                schedule.id,
                ScheduleCompletion::RecordLog {
                    service_date: date(8, 1),
                    description: None,
                    cost: 0.0,
                },
            )
            .await;
        assert!(matches!(result, Err(MaintenanceError::NotFound(_))));
    }
}
