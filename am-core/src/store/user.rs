//! User Store - accounts and credentials

use async_trait::async_trait;

use crate::error::MaintenanceResult;
use crate::types::{LoginKind, NewUser, User, UserCredentials, UserId, UserUpdate};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Register a user; username and email must both be unused
    async fn register(&self, input: NewUser) -> MaintenanceResult<User>;

    /// Look up a user for login, by email or username
    async fn find_credentials(
        &self,
        kind: LoginKind,
        login_id: &str,
    ) -> MaintenanceResult<Option<UserCredentials>>;

    /// Fetch a user by id
    async fn get_user(&self, user_id: UserId) -> MaintenanceResult<User>;

    /// Update the caller's own account
    async fn update_user(&self, user_id: UserId, update: UserUpdate) -> MaintenanceResult<User>;

    /// Delete the caller's account and everything it owns
    async fn delete_user(&self, user_id: UserId) -> MaintenanceResult<()>;
}
