//! Asset Maintenance Core
//!
//! Domain types, validation rules and store interfaces for the asset
//! maintenance tracker. Users own assets; maintenance logs record completed
//! services on an asset; maintenance schedules plan future services, due by
//! date or by a free-text condition.
//!
//! Storage lives in `am-db`, which implements the traits in [`store`].

pub mod constants;
pub mod credentials;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use constants::*;
pub use error::*;
pub use types::*;
