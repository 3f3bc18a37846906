//! Domain types for the maintenance tracker

mod asset;
mod dashboard;
mod ids;
mod maintenance_log;
mod schedule;
mod user;

pub use asset::*;
pub use dashboard::*;
pub use ids::*;
pub use maintenance_log::*;
pub use schedule::*;
pub use user::*;
