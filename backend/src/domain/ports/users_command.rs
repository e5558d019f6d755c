//! Driving port for user writes.
//!
//! Inputs arrive as raw field maps; implementations validate them before
//! touching storage.

use async_trait::async_trait;

use crate::domain::{Error, FieldMap, UserId, UserWithPhone};

/// Domain use-case port for creating, updating and deleting users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, fields: FieldMap) -> Result<UserWithPhone, Error>;

    /// Validate and apply a partial update to an existing user.
    async fn update_user(&self, id: UserId, fields: FieldMap) -> Result<UserWithPhone, Error>;

    /// Remove a user.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
