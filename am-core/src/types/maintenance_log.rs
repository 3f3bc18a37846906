//! Maintenance log types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AssetId, LogId};

/// A completed maintenance service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: LogId,
    pub asset_id: AssetId,
    /// Name of the parent asset, joined in on reads
    pub asset_name: String,
    pub service_name: String,
    pub service_date: NaiveDate,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Log creation input
#[derive(Debug, Clone)]
pub struct NewMaintenanceLog {
    pub asset_id: AssetId,
    pub service_name: String,
    pub service_date: NaiveDate,
    pub description: Option<String>,
    pub cost: Option<f64>,
}

/// Partial log update
#[derive(Debug, Clone, Default)]
pub struct MaintenanceLogUpdate {
    /// Move the log to another asset of the same owner
    pub asset_id: Option<AssetId>,
    pub service_name: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub cost: Option<f64>,
}

impl MaintenanceLogUpdate {
    pub fn is_empty(&self) -> bool {
        self.asset_id.is_none()
            && self.service_name.is_none()
            && self.service_date.is_none()
            && self.description.is_none()
            && self.cost.is_none()
    }
}

/// Columns a log listing may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSortField {
    ServiceDate,
    CreatedAt,
    Cost,
}

impl LogSortField {
    /// Unknown names yield `None` and the listing falls back to the default order
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "service_date" => Some(Self::ServiceDate),
            "created_at" => Some(Self::CreatedAt),
            "cost" => Some(Self::Cost),
            _ => None,
        }
    }

    /// Qualified column for SQL ordering
    pub fn column(&self) -> &'static str {
        match self {
            Self::ServiceDate => "ml.service_date",
            Self::CreatedAt => "ml.created_at",
            Self::Cost => "ml.cost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Only an explicit `desc` sorts descending
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some(o) if o.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Options for listing every log of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogListQuery {
    pub limit: Option<u32>,
    pub sort: LogSortField,
    pub order: SortOrder,
}

impl Default for LogListQuery {
    fn default() -> Self {
        Self {
            limit: None,
            sort: LogSortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl LogListQuery {
    /// Build from raw `_limit`, `_sort`, `_order` parameters
    pub fn from_params(limit: Option<u32>, sort: Option<&str>, order: Option<&str>) -> Self {
        match sort.and_then(LogSortField::parse) {
            Some(field) => Self {
                limit,
                sort: field,
                order: SortOrder::parse(order),
            },
            None => Self {
                limit,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_query_defaults_for_unknown_sort() {
        let query = LogListQuery::from_params(Some(5), Some("DROP TABLE"), Some("asc"));
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.sort, LogSortField::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_log_query_known_sort() {
        let query = LogListQuery::from_params(None, Some("cost"), Some("desc"));
        assert_eq!(query.sort, LogSortField::Cost);
        assert_eq!(query.order, SortOrder::Desc);

        let query = LogListQuery::from_params(None, Some("service_date"), None);
        assert_eq!(query.sort, LogSortField::ServiceDate);
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(MaintenanceLogUpdate::default().is_empty());
        let update = MaintenanceLogUpdate {
            cost: Some(0.0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
