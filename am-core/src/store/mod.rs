//! Store interfaces
//!
//! The tracker keeps four stores, one per entity, plus the dashboard
//! aggregation that reads across them:
//! - User Store: registration, credentials, and the caller's own account
//! - Asset Store: assets, scoped to their owner
//! - Log Store: completed maintenance, scoped through the parent asset
//! - Schedule Store: planned maintenance and its completion
//!
//! Every scoped operation takes the caller's [`UserId`](crate::types::UserId)
//! first. Rows belonging to another user are reported as `NotFound`.

mod asset;
mod dashboard;
mod maintenance_log;
mod schedule;
mod user;

pub use asset::*;
pub use dashboard::*;
pub use maintenance_log::*;
pub use schedule::*;
pub use user::*;
