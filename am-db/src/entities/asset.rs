//! Asset row

use am_core::{Asset, AssetId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AssetRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetRow {
    pub const TABLE: &'static str = "assets";

    /// Column list for `SELECT`/`RETURNING`
    pub const COLUMNS: &'static str = "id, user_id, name, description, created_at, updated_at";

    pub fn into_record(self) -> Asset {
        Asset {
            id: AssetId(self.id),
            owner_id: UserId(self.user_id),
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
