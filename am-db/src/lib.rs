//! Asset maintenance database layer
//!
//! SQLite persistence for the maintenance tracker, built on `sqlx`.
//!
//! - [`schema`] - table definitions, applied by `init_schema`
//! - [`entities`] - row types decoded with `FromRow`
//! - [`repos`] - per-table SQL, every query scoped by owner
//! - [`services`] - implementations of the `am-core` store traits
//!
//! # Example
//!
//! ```ignore
//! use am_db::{DatabaseConfig, MaintenanceDatabase, AssetService};
//! use std::sync::Arc;
//!
//! async fn example() {
//!     let db = MaintenanceDatabase::connect(&DatabaseConfig::in_memory()).await.unwrap();
//!     db.init_schema().await.unwrap();
//!     let assets = AssetService::new(Arc::new(db));
//! }
//! ```

pub mod entities;
pub mod error;
pub mod repos;
pub mod schema;
pub mod services;

pub use entities::*;
pub use error::*;
pub use repos::*;
pub use schema::{DROP_SCHEMA, SCHEMA};
pub use services::{
    AssetService, DashboardService, MaintenanceLogService, ScheduleService, UserService,
};
