//! SQLite schema for the maintenance tracker
//!
//! Ownership is stored once, on `assets.user_id`; logs and schedules reach
//! their owner through `asset_id`. Deleting a user or an asset cascades,
//! deleting a log only unlinks the schedules that pointed at it.

/// Schema creation, safe to run on every start
pub const SCHEMA: &str = r#"
-- ============================================
-- Users
-- ============================================
CREATE TABLE IF NOT EXISTS users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    username        TEXT NOT NULL UNIQUE,
    email           TEXT NOT NULL UNIQUE,
    password_hash   TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- ============================================
-- Assets
-- ============================================
CREATE TABLE IF NOT EXISTS assets (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name            TEXT NOT NULL,
    description     TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_assets_user ON assets(user_id);

-- ============================================
-- Maintenance logs
-- ============================================
CREATE TABLE IF NOT EXISTS maintenance_logs (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id        INTEGER NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    service_name    TEXT NOT NULL,
    service_date    TEXT NOT NULL,
    description     TEXT,
    cost            REAL CHECK (cost IS NULL OR cost >= 0),
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_logs_asset ON maintenance_logs(asset_id, service_date);

-- ============================================
-- Maintenance schedules
-- ============================================
CREATE TABLE IF NOT EXISTS maintenance_schedules (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id        INTEGER NOT NULL REFERENCES assets(id) ON DELETE CASCADE,
    log_id          INTEGER REFERENCES maintenance_logs(id) ON DELETE SET NULL,
    service_name    TEXT NOT NULL,
    due_date        TEXT,
    due_condition   TEXT,
    is_completed    INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_schedules_asset ON maintenance_schedules(asset_id, is_completed);
"#;

/// Schema teardown, in dependency order
pub const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS maintenance_schedules;
DROP TABLE IF EXISTS maintenance_logs;
DROP TABLE IF EXISTS assets;
DROP TABLE IF EXISTS users;
"#;
