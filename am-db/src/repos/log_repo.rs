//! Maintenance log repository
//!
//! Logs carry no owner column. Every query joins `assets` and filters on
//! `a.user_id`, which is also how each row picks up its `asset_name`.

use am_core::{AssetId, LogId, LogListQuery, MaintenanceLogUpdate, NewMaintenanceLog, UserId};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::entities::LogRow;
use crate::error::DbResult;

pub struct LogRepo {
    pool: SqlitePool,
}

impl LogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a log on an open connection or transaction; returns its id.
    /// Callers check that the asset belongs to them first.
    pub async fn insert(
        conn: &mut SqliteConnection,
        input: &NewMaintenanceLog,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO maintenance_logs \
             (asset_id, service_name, service_date, description, cost, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(input.asset_id.get())
        .bind(&input.service_name)
        .bind(input.service_date)
        .bind(&input.description)
        .bind(input.cost)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    /// Insert a log outside any transaction
    pub async fn create(&self, input: &NewMaintenanceLog, now: DateTime<Utc>) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;
        Self::insert(&mut conn, input, now).await
    }

    /// Get an owned log on an open connection or transaction
    pub async fn fetch(
        conn: &mut SqliteConnection,
        owner: UserId,
        log_id: LogId,
    ) -> DbResult<Option<LogRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE ml.id = ? AND a.user_id = ?",
            LogRow::COLUMNS,
            LogRow::FROM_OWNED
        );

        let row = sqlx::query_as::<_, LogRow>(&query)
            .bind(log_id.get())
            .bind(owner.get())
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row)
    }

    pub async fn get(&self, owner: UserId, log_id: LogId) -> DbResult<Option<LogRow>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch(&mut conn, owner, log_id).await
    }

    pub async fn exists(&self, owner: UserId, log_id: LogId) -> DbResult<bool> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE ml.id = ? AND a.user_id = ?)",
            LogRow::FROM_OWNED
        );

        let found: bool = sqlx::query_scalar(&query)
            .bind(log_id.get())
            .bind(owner.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(found)
    }

    /// All logs of `owner`, sorted by the requested column.
    /// The sort column and direction come from closed enums, never from raw input.
    pub async fn list(&self, owner: UserId, query: &LogListQuery) -> DbResult<Vec<LogRow>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT ");
        builder
            .push(LogRow::COLUMNS)
            .push(" FROM ")
            .push(LogRow::FROM_OWNED)
            .push(" WHERE a.user_id = ")
            .push_bind(owner.get())
            .push(" ORDER BY ")
            .push(query.sort.column())
            .push(" ")
            .push(query.order.as_sql())
            .push(", ml.id ")
            .push(query.order.as_sql());

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = builder
            .build_query_as::<LogRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Logs of one asset, most recent service first
    pub async fn list_by_asset(&self, owner: UserId, asset_id: AssetId) -> DbResult<Vec<LogRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE ml.asset_id = ? AND a.user_id = ? \
             ORDER BY ml.service_date DESC, ml.id DESC",
            LogRow::COLUMNS,
            LogRow::FROM_OWNED
        );

        let rows = sqlx::query_as::<_, LogRow>(&query)
            .bind(asset_id.get())
            .bind(owner.get())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Write the supplied fields; returns the number of rows changed.
    /// A new `asset_id` must already be known to belong to `owner`.
    pub async fn update(
        &self,
        owner: UserId,
        log_id: LogId,
        update: &MaintenanceLogUpdate,
        now: DateTime<Utc>,
    ) -> DbResult<u64> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE maintenance_logs SET ");
        let mut fields = builder.separated(", ");

        if let Some(asset_id) = update.asset_id {
            fields.push("asset_id = ").push_bind_unseparated(asset_id.get());
        }
        if let Some(service_name) = &update.service_name {
            fields
                .push("service_name = ")
                .push_bind_unseparated(service_name.clone());
        }
        if let Some(service_date) = update.service_date {
            fields
                .push("service_date = ")
                .push_bind_unseparated(service_date);
        }
        if let Some(description) = &update.description {
            let description = Some(description.clone()).filter(|d| !d.is_empty());
            fields
                .push("description = ")
                .push_bind_unseparated(description);
        }
        if let Some(cost) = update.cost {
            fields.push("cost = ").push_bind_unseparated(cost);
        }
        fields.push("updated_at = ").push_bind_unseparated(now);

        builder
            .push(" WHERE id = ")
            .push_bind(log_id.get())
            .push(" AND asset_id IN (SELECT id FROM assets WHERE user_id = ")
            .push_bind(owner.get())
            .push(")");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete an owned log; returns the number of rows removed
    pub async fn delete(&self, owner: UserId, log_id: LogId) -> DbResult<u64> {
        let result = sqlx::query(
            "DELETE FROM maintenance_logs \
             WHERE id = ? AND asset_id IN (SELECT id FROM assets WHERE user_id = ?)",
        )
        .bind(log_id.get())
        .bind(owner.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
