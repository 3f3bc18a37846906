//! Row types as stored in SQLite
//!
//! Each row converts into its `am-core` record with `into_record`.

mod asset;
mod maintenance_log;
mod schedule;
mod user;

pub use asset::*;
pub use maintenance_log::*;
pub use schedule::*;
pub use user::*;
