//! Repositories
//!
//! One repository per table. Every read or write on assets, logs and
//! schedules is filtered by the owning user's id, so an id belonging to
//! someone else behaves exactly like an id that does not exist.

mod asset_repo;
mod log_repo;
mod schedule_repo;
mod user_repo;

pub use asset_repo::*;
pub use log_repo::*;
pub use schedule_repo::*;
pub use user_repo::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::error::{DbError, DbResult};

/// Connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://asset_maintenance.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://asset_maintenance.db".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory database, used by tests
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Database handle - main entry point for storage operations
pub struct MaintenanceDatabase {
    pool: SqlitePool,
    pub users: UserRepo,
    pub assets: AssetRepo,
    pub logs: LogRepo,
    pub schedules: ScheduleRepo,
}

impl MaintenanceDatabase {
    /// Open a pool for the configured URL, creating the file if missing
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Each in-memory connection is its own database; keep exactly one alive
        let pool = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(options)
                .await?
        };

        info!(url = %config.url, "Connected to database");
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepo::new(pool.clone()),
            assets: AssetRepo::new(pool.clone()),
            logs: LogRepo::new(pool.clone()),
            schedules: ScheduleRepo::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes
    pub async fn init_schema(&self) -> DbResult<()> {
        sqlx::raw_sql(crate::schema::SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Schema(e.to_string()))?;
        Ok(())
    }

    /// Drop every table
    pub async fn drop_schema(&self) -> DbResult<()> {
        sqlx::raw_sql(crate::schema::DROP_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Schema(e.to_string()))?;
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> DbResult<bool> {
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(one == 1)
    }
}
