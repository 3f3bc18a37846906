//! Maintenance schedule repository

use am_core::{AssetId, LogId, NewSchedule, ScheduleId, ScheduleUpdate, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::entities::ScheduleRow;
use crate::error::DbResult;

/// Schedule counts for one owner's dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct ScheduleCounts {
    pub pending: i64,
    pub overdue: i64,
    pub completed: i64,
}

pub struct ScheduleRepo {
    pool: SqlitePool,
}

impl ScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a schedule; returns its id. Callers check asset and log ownership.
    pub async fn insert(&self, input: &NewSchedule, now: DateTime<Utc>) -> DbResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO maintenance_schedules \
             (asset_id, log_id, service_name, due_date, due_condition, is_completed, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(input.asset_id.get())
        .bind(input.log_id.map(|id| id.get()))
        .bind(&input.service_name)
        .bind(input.due_date)
        .bind(&input.due_condition)
        .bind(input.is_completed)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Get an owned schedule on an open connection or transaction
    pub async fn fetch(
        conn: &mut SqliteConnection,
        owner: UserId,
        schedule_id: ScheduleId,
    ) -> DbResult<Option<ScheduleRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE ms.id = ? AND a.user_id = ?",
            ScheduleRow::COLUMNS,
            ScheduleRow::FROM_OWNED
        );

        let row = sqlx::query_as::<_, ScheduleRow>(&query)
            .bind(schedule_id.get())
            .bind(owner.get())
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row)
    }

    pub async fn get(&self, owner: UserId, schedule_id: ScheduleId) -> DbResult<Option<ScheduleRow>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch(&mut conn, owner, schedule_id).await
    }

    /// All schedules of `owner`: pending first, then by due date
    pub async fn list(&self, owner: UserId, include_completed: bool) -> DbResult<Vec<ScheduleRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE a.user_id = ? AND (? OR ms.is_completed = 0) \
             ORDER BY ms.is_completed, ms.due_date NULLS LAST, ms.created_at DESC, ms.id DESC",
            ScheduleRow::COLUMNS,
            ScheduleRow::FROM_OWNED
        );

        let rows = sqlx::query_as::<_, ScheduleRow>(&query)
            .bind(owner.get())
            .bind(include_completed)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Incomplete schedules of `owner`, soonest due first
    pub async fn pending(&self, owner: UserId) -> DbResult<Vec<ScheduleRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE a.user_id = ? AND ms.is_completed = 0 \
             ORDER BY ms.due_date NULLS LAST, ms.created_at DESC, ms.id DESC",
            ScheduleRow::COLUMNS,
            ScheduleRow::FROM_OWNED
        );

        let rows = sqlx::query_as::<_, ScheduleRow>(&query)
            .bind(owner.get())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Schedules of one asset
    pub async fn list_by_asset(
        &self,
        owner: UserId,
        asset_id: AssetId,
        include_completed: bool,
    ) -> DbResult<Vec<ScheduleRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE ms.asset_id = ? AND a.user_id = ? AND (? OR ms.is_completed = 0) \
             ORDER BY ms.due_date NULLS LAST, ms.created_at DESC, ms.id DESC",
            ScheduleRow::COLUMNS,
            ScheduleRow::FROM_OWNED
        );

        let rows = sqlx::query_as::<_, ScheduleRow>(&query)
            .bind(asset_id.get())
            .bind(owner.get())
            .bind(include_completed)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Every schedule of one asset in overview order: pending first
    pub async fn all_for_asset(&self, owner: UserId, asset_id: AssetId) -> DbResult<Vec<ScheduleRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE ms.asset_id = ? AND a.user_id = ? \
             ORDER BY ms.is_completed, ms.due_date NULLS LAST, ms.id",
            ScheduleRow::COLUMNS,
            ScheduleRow::FROM_OWNED
        );

        let rows = sqlx::query_as::<_, ScheduleRow>(&query)
            .bind(asset_id.get())
            .bind(owner.get())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Write the supplied fields; returns the number of rows changed.
    /// `Some(None)` on a nullable field writes NULL.
    pub async fn update(
        &self,
        owner: UserId,
        schedule_id: ScheduleId,
        update: &ScheduleUpdate,
        now: DateTime<Utc>,
    ) -> DbResult<u64> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE maintenance_schedules SET ");
        let mut fields = builder.separated(", ");

        if let Some(service_name) = &update.service_name {
            fields
                .push("service_name = ")
                .push_bind_unseparated(service_name.clone());
        }
        if let Some(due_date) = update.due_date {
            fields.push("due_date = ").push_bind_unseparated(due_date);
        }
        if let Some(due_condition) = &update.due_condition {
            fields
                .push("due_condition = ")
                .push_bind_unseparated(due_condition.clone());
        }
        if let Some(is_completed) = update.is_completed {
            fields
                .push("is_completed = ")
                .push_bind_unseparated(is_completed);
        }
        if let Some(log_id) = update.log_id {
            fields
                .push("log_id = ")
                .push_bind_unseparated(log_id.map(|id| id.get()));
        }
        fields.push("updated_at = ").push_bind_unseparated(now);

        builder
            .push(" WHERE id = ")
            .push_bind(schedule_id.get())
            .push(" AND asset_id IN (SELECT id FROM assets WHERE user_id = ")
            .push_bind(owner.get())
            .push(")");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Flag a pending schedule completed and link its log.
    /// Returns 0 when the schedule was already completed.
    pub async fn mark_completed(
        conn: &mut SqliteConnection,
        schedule_id: ScheduleId,
        log_id: LogId,
        now: DateTime<Utc>,
    ) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE maintenance_schedules SET is_completed = 1, log_id = ?, updated_at = ? \
             WHERE id = ? AND is_completed = 0",
        )
        .bind(log_id.get())
        .bind(now)
        .bind(schedule_id.get())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete an owned schedule; returns the number of rows removed
    pub async fn delete(&self, owner: UserId, schedule_id: ScheduleId) -> DbResult<u64> {
        let result = sqlx::query(
            "DELETE FROM maintenance_schedules \
             WHERE id = ? AND asset_id IN (SELECT id FROM assets WHERE user_id = ?)",
        )
        .bind(schedule_id.get())
        .bind(owner.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Pending, overdue (pending with a due date before `today`) and completed counts
    pub async fn counts(&self, owner: UserId, today: NaiveDate) -> DbResult<ScheduleCounts> {
        let query = format!(
            "SELECT \
                COALESCE(SUM(CASE WHEN ms.is_completed = 0 THEN 1 ELSE 0 END), 0) AS pending, \
                COALESCE(SUM(CASE WHEN ms.is_completed = 0 AND ms.due_date < ? THEN 1 ELSE 0 END), 0) AS overdue, \
                COALESCE(SUM(CASE WHEN ms.is_completed = 1 THEN 1 ELSE 0 END), 0) AS completed \
             FROM {} WHERE a.user_id = ?",
            ScheduleRow::FROM_OWNED
        );

        let counts = sqlx::query_as::<_, ScheduleCounts>(&query)
            .bind(today)
            .bind(owner.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(counts)
    }
}
