//! Asset repository

use am_core::{AssetId, AssetStatistics, AssetUpdate, NewAsset, UserId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::entities::AssetRow;
use crate::error::DbResult;

/// Aggregates over one asset's logs and schedules
#[derive(Debug, FromRow)]
struct StatisticsRow {
    total_maintenance: i64,
    total_cost: f64,
    total_schedules: i64,
    completed_maintenance: i64,
}

pub struct AssetRepo {
    pool: SqlitePool,
}

impl AssetRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an asset for `owner`
    pub async fn insert(
        &self,
        owner: UserId,
        input: &NewAsset,
        now: DateTime<Utc>,
    ) -> DbResult<AssetRow> {
        let query = format!(
            "INSERT INTO {} (user_id, name, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            AssetRow::TABLE,
            AssetRow::COLUMNS
        );

        let row = sqlx::query_as::<_, AssetRow>(&query)
            .bind(owner.get())
            .bind(&input.name)
            .bind(&input.description)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// All assets of `owner`, newest first
    pub async fn list_by_owner(&self, owner: UserId) -> DbResult<Vec<AssetRow>> {
        self.recent(owner, None).await
    }

    /// Newest assets of `owner`, optionally capped
    pub async fn recent(&self, owner: UserId, limit: Option<u32>) -> DbResult<Vec<AssetRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
            AssetRow::COLUMNS,
            AssetRow::TABLE
        );

        // SQLite treats a negative LIMIT as "no limit"
        let limit = limit.map(i64::from).unwrap_or(-1);

        let rows = sqlx::query_as::<_, AssetRow>(&query)
            .bind(owner.get())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Get one asset if it belongs to `owner`
    pub async fn get(&self, owner: UserId, asset_id: AssetId) -> DbResult<Option<AssetRow>> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = ? AND user_id = ?",
            AssetRow::COLUMNS,
            AssetRow::TABLE
        );

        let row = sqlx::query_as::<_, AssetRow>(&query)
            .bind(asset_id.get())
            .bind(owner.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn exists(&self, owner: UserId, asset_id: AssetId) -> DbResult<bool> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE id = ? AND user_id = ?)",
        )
        .bind(asset_id.get())
        .bind(owner.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    /// Write the supplied fields; `None` when no owned row matched
    pub async fn update(
        &self,
        owner: UserId,
        asset_id: AssetId,
        update: &AssetUpdate,
        now: DateTime<Utc>,
    ) -> DbResult<Option<AssetRow>> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE assets SET ");
        let mut fields = builder.separated(", ");

        if let Some(name) = &update.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(description) = &update.description {
            let description = Some(description.clone()).filter(|d| !d.is_empty());
            fields
                .push("description = ")
                .push_bind_unseparated(description);
        }
        fields.push("updated_at = ").push_bind_unseparated(now);

        builder
            .push(" WHERE id = ")
            .push_bind(asset_id.get())
            .push(" AND user_id = ")
            .push_bind(owner.get())
            .push(" RETURNING ")
            .push(AssetRow::COLUMNS);

        let row = builder
            .build_query_as::<AssetRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Delete an owned asset; returns the number of rows removed
    pub async fn delete(&self, owner: UserId, asset_id: AssetId) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM assets WHERE id = ? AND user_id = ?")
            .bind(asset_id.get())
            .bind(owner.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_by_owner(&self, owner: UserId) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE user_id = ?")
            .bind(owner.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Maintenance statistics for one asset. Callers check ownership first.
    pub async fn statistics(&self, asset_id: AssetId) -> DbResult<AssetStatistics> {
        let row = sqlx::query_as::<_, StatisticsRow>(
            "SELECT \
                (SELECT COUNT(*) FROM maintenance_logs WHERE asset_id = ?1) AS total_maintenance, \
                (SELECT COALESCE(SUM(cost), 0.0) FROM maintenance_logs WHERE asset_id = ?1) AS total_cost, \
                (SELECT COUNT(*) FROM maintenance_schedules WHERE asset_id = ?1) AS total_schedules, \
                (SELECT COALESCE(SUM(CASE WHEN is_completed THEN 1 ELSE 0 END), 0) \
                    FROM maintenance_schedules WHERE asset_id = ?1) AS completed_maintenance",
        )
        .bind(asset_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(AssetStatistics {
            total_maintenance: row.total_maintenance,
            completed_maintenance: row.completed_maintenance,
            pending_maintenance: row.total_schedules - row.completed_maintenance,
            total_cost: row.total_cost,
            total_schedules: row.total_schedules,
        })
    }
}
