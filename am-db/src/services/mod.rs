//! Store implementations
//!
//! Each service wraps the shared [`MaintenanceDatabase`](crate::repos::MaintenanceDatabase)
//! and implements one `am-core` store trait. Services validate input and
//! check ownership before any write reaches a repository.

pub mod asset_service;
pub mod dashboard_service;
pub mod log_service;
pub mod schedule_service;
pub mod user_service;

pub use asset_service::AssetService;
pub use dashboard_service::DashboardService;
pub use log_service::MaintenanceLogService;
pub use schedule_service::ScheduleService;
pub use user_service::UserService;

#[cfg(test)]
pub(crate) mod test_support {
    use am_core::{AssetId, NewAsset, UserId};
    use chrono::Utc;
    use std::sync::Arc;

    use crate::repos::{DatabaseConfig, MaintenanceDatabase};

    /// Fresh in-memory database with the schema applied
    pub async fn test_database() -> Arc<MaintenanceDatabase> {
        let db = MaintenanceDatabase::connect(&DatabaseConfig::in_memory())
            .await
            .unwrap();
        db.init_schema().await.unwrap();
        Arc::new(db)
    }

    /// Insert a user directly; the password hash is never checked in these tests
    pub async fn seed_user(db: &MaintenanceDatabase, username: &str) -> UserId {
        let row = db
            .users
            .insert(
                username,
                &format!("{username}@example.com"),
                "not-a-real-hash",
                Utc::now(),
            )
            .await
            .unwrap();
        UserId(row.id)
    }

    pub async fn seed_asset(db: &MaintenanceDatabase, owner: UserId, name: &str) -> AssetId {
        let input = NewAsset {
            name: name.to_string(),
            description: None,
        };
        let row = db.assets.insert(owner, &input, Utc::now()).await.unwrap();
        AssetId(row.id)
    }
}
