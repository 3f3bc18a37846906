//! User service
//!
//! Implements `UserStore` on top of `UserRepo`. Passwords are hashed here,
//! so nothing below this layer ever sees a plaintext password.

use am_core::credentials::hash_password;
use am_core::store::UserStore;
use am_core::validation::{validate_new_user, validate_user_update};
use am_core::{
    LoginKind, MaintenanceError, MaintenanceResult, NewUser, User, UserCredentials, UserId,
    UserUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DbError;
use crate::repos::{MaintenanceDatabase, UserChanges};

pub struct UserService {
    database: Arc<MaintenanceDatabase>,
}

impl UserService {
    pub fn new(database: Arc<MaintenanceDatabase>) -> Self {
        Self { database }
    }

    fn user_not_found(user_id: UserId) -> MaintenanceError {
        MaintenanceError::not_found(format!("User {user_id}"))
    }

    fn identity_taken() -> MaintenanceError {
        MaintenanceError::AlreadyExists("Username or email".to_string())
    }

    /// A concurrent registration can slip past `is_taken` and trip the
    /// UNIQUE index instead
    fn map_identity_conflict(e: DbError) -> MaintenanceError {
        if e.is_unique_violation() {
            Self::identity_taken()
        } else {
            e.into()
        }
    }
}

#[async_trait]
impl UserStore for UserService {
    async fn register(&self, input: NewUser) -> MaintenanceResult<User> {
        let input = validate_new_user(input)?;

        let repo = &self.database.users;
        if repo
            .is_taken(Some(&input.username), Some(&input.email), None)
            .await?
        {
            return Err(Self::identity_taken());
        }

        let password_hash = hash_password(&input.password)?;
        let row = repo
            .insert(&input.username, &input.email, &password_hash, Utc::now())
            .await
            .map_err(Self::map_identity_conflict)?;

        info!(user_id = row.id, username = %row.username, "User registered");
        Ok(row.into_record())
    }

    async fn find_credentials(
        &self,
        kind: LoginKind,
        login_id: &str,
    ) -> MaintenanceResult<Option<UserCredentials>> {
        let row = self
            .database
            .users
            .find_by_login(kind, login_id.trim())
            .await?;
        if row.is_none() {
            debug!(?kind, "No user for login id");
        }
        Ok(row.map(|r| r.into_credentials()))
    }

    async fn get_user(&self, user_id: UserId) -> MaintenanceResult<User> {
        self.database
            .users
            .get(user_id)
            .await?
            .map(|r| r.into_record())
            .ok_or_else(|| Self::user_not_found(user_id))
    }

    async fn update_user(&self, user_id: UserId, update: UserUpdate) -> MaintenanceResult<User> {
        let update = validate_user_update(update)?;

        let repo = &self.database.users;
        if repo
            .is_taken(update.username.as_deref(), update.email.as_deref(), Some(user_id))
            .await?
        {
            return Err(Self::identity_taken());
        }

        let changes = UserChanges {
            username: update.username,
            email: update.email,
            password_hash: update.password.as_deref().map(hash_password).transpose()?,
        };

        let row = repo
            .update(user_id, &changes, Utc::now())
            .await
            .map_err(Self::map_identity_conflict)?
            .ok_or_else(|| Self::user_not_found(user_id))?;

        info!(user_id = %user_id, "User updated");
        Ok(row.into_record())
    }

    async fn delete_user(&self, user_id: UserId) -> MaintenanceResult<()> {
        if self.database.users.delete(user_id).await? == 0 {
            return Err(Self::user_not_found(user_id));
        }
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::test_database;
    use am_core::credentials::verify_password;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_find_credentials() {
        let service = UserService::new(test_database().await);

        let user = service
            .register(new_user("  alice ", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");

        let by_email = service
            .find_credentials(LoginKind::Email, "alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.user.id, user.id);
        assert_ne!(by_email.password_hash, "secret123");
        assert!(verify_password("secret123", &by_email.password_hash).unwrap());

        let by_name = service
            .find_credentials(LoginKind::Username, "alice")
            .await
            .unwrap();
        assert!(by_name.is_some());

        let missing = service
            .find_credentials(LoginKind::Username, "bob")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let service = UserService::new(test_database().await);
        service
            .register(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let same_name = service.register(new_user("alice", "other@example.com")).await;
        assert!(matches!(same_name, Err(MaintenanceError::AlreadyExists(_))));

        let same_email = service.register(new_user("bob", "alice@example.com")).await;
        assert!(matches!(same_email, Err(MaintenanceError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_unique_index_conflict_hides_storage_detail() {
        let db = test_database().await;
        let now = Utc::now();
        db.users
            .insert("alice", "alice@example.com", "hash", now)
            .await
            .unwrap();

        let raced = db
            .users
            .insert("alice", "alice@example.com", "hash", now)
            .await
            .unwrap_err();
        assert!(raced.is_unique_violation());

        let mapped = UserService::map_identity_conflict(raced);
        assert!(matches!(
            &mapped,
            MaintenanceError::AlreadyExists(what) if what == "Username or email"
        ));
        assert!(!mapped.to_string().contains("UNIQUE"));
    }

    #[tokio::test]
    async fn test_update_user() {
        let service = UserService::new(test_database().await);
        let alice = service
            .register(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        service
            .register(new_user("bob", "bob@example.com"))
            .await
            .unwrap();

        let empty = service.update_user(alice.id, UserUpdate::default()).await;
        assert!(matches!(empty, Err(MaintenanceError::NoChanges)));

        let taken = service
            .update_user(
                alice.id,
                UserUpdate {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(taken, Err(MaintenanceError::AlreadyExists(_))));

        // Re-submitting one's own email is not a conflict
        let updated = service
            .update_user(
                alice.id,
                UserUpdate {
                    username: Some("alice2".to_string()),
                    email: Some("alice@example.com".to_string()),
                    password: Some("newpassword".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.username, "alice2");
        assert!(updated.updated_at >= alice.updated_at);

        let creds = service
            .find_credentials(LoginKind::Username, "alice2")
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password("newpassword", &creds.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = UserService::new(test_database().await);
        let user = service
            .register(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        service.delete_user(user.id).await.unwrap();
        assert!(matches!(
            service.get_user(user.id).await,
            Err(MaintenanceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_user(user.id).await,
            Err(MaintenanceError::NotFound(_))
        ));
    }
}
