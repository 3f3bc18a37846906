//! User account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A registered user, without credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with the stored password hash, used only by login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial update of the caller's own account
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// How a login identifier is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginKind {
    Email,
    Username,
}

impl LoginKind {
    /// Identifiers containing `@` are emails; usernames may not contain one
    pub fn of(login_id: &str) -> Self {
        if login_id.contains('@') {
            LoginKind::Email
        } else {
            LoginKind::Username
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_kind() {
        assert_eq!(LoginKind::of("ana@example.com"), LoginKind::Email);
        assert_eq!(LoginKind::of("ana"), LoginKind::Username);
    }

    #[test]
    fn test_user_update_is_empty() {
        assert!(UserUpdate::default().is_empty());
        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
