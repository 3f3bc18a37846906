//! User repository

use am_core::{LoginKind, UserId};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::entities::UserRow;
use crate::error::DbResult;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

/// Fields written by an account update, already validated and hashed
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user
    pub async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> DbResult<UserRow> {
        let query = format!(
            "INSERT INTO {} (username, email, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}",
            UserRow::TABLE
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Get user by ID
    pub async fn get(&self, user_id: UserId) -> DbResult<Option<UserRow>> {
        let query = format!("SELECT {USER_COLUMNS} FROM {} WHERE id = ?", UserRow::TABLE);

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Find a user by email or username
    pub async fn find_by_login(&self, kind: LoginKind, login_id: &str) -> DbResult<Option<UserRow>> {
        let column = match kind {
            LoginKind::Email => "email",
            LoginKind::Username => "username",
        };
        let query = format!(
            "SELECT {USER_COLUMNS} FROM {} WHERE {column} = ?",
            UserRow::TABLE
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(login_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Whether another user already holds the username or the email
    pub async fn is_taken(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<UserId>,
    ) -> DbResult<bool> {
        if username.is_none() && email.is_none() {
            return Ok(false);
        }

        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users \
             WHERE (username = ? OR email = ?) AND id != ?)",
        )
        .bind(username)
        .bind(email)
        .bind(except.map(|id| id.get()).unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    /// Apply account changes; `None` when the user no longer exists
    pub async fn update(
        &self,
        user_id: UserId,
        changes: &UserChanges,
        now: DateTime<Utc>,
    ) -> DbResult<Option<UserRow>> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");

        if let Some(username) = &changes.username {
            fields.push("username = ").push_bind_unseparated(username.clone());
        }
        if let Some(email) = &changes.email {
            fields.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(hash) = &changes.password_hash {
            fields.push("password_hash = ").push_bind_unseparated(hash.clone());
        }
        fields.push("updated_at = ").push_bind_unseparated(now);

        builder
            .push(" WHERE id = ")
            .push_bind(user_id.get())
            .push(" RETURNING ")
            .push(USER_COLUMNS);

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Delete a user; returns the number of rows removed
    pub async fn delete(&self, user_id: UserId) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
