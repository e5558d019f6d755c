//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserWithPhone};

/// Domain use-case port for listing and fetching users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users with their phones.
    async fn list_users(&self) -> Result<Vec<UserWithPhone>, Error>;

    /// One user with its phone, or `NotFound`.
    async fn get_user(&self, id: UserId) -> Result<UserWithPhone, Error>;
}
