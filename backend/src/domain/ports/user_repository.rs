//! Port abstraction for user persistence adapters and their errors.
//!
//! Users are always read together with their phone. Writes that carry a phone
//! number touch both records atomically.

use async_trait::async_trait;

use crate::domain::{NewUser, UserChanges, UserId, UserWithPhone};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique or foreign key constraint rejected the write.
        Conflict { field: String } => "user repository constraint violated on {field}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in id order.
    async fn list(&self) -> Result<Vec<UserWithPhone>, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserWithPhone>, UserRepositoryError>;

    /// Insert a user, and its phone when a number is supplied.
    async fn create(&self, user: &NewUser) -> Result<UserWithPhone, UserRepositoryError>;

    /// Apply `changes`; `Ok(None)` when the user does not exist.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<UserWithPhone>, UserRepositoryError>;

    /// Delete a user, its phone, and detach its posts. `Ok(false)` when the
    /// user does not exist.
    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
