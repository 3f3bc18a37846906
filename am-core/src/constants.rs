//! Shared constants

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Default token lifetime (one hour)
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60;

/// Number of assets and logs shown on the dashboard
pub const DASHBOARD_RECENT_LIMIT: u32 = 5;

/// Description given to logs recorded while completing a schedule
pub const COMPLETION_LOG_DESCRIPTION: &str = "Scheduled maintenance completed";

/// Upper bound accepted for `_limit` on log listings
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Maximum length of names (asset, service, username)
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of free-text fields (descriptions, due conditions)
pub const MAX_TEXT_LEN: usize = 4096;
