//! Port abstraction for post persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewPost, PostChanges, PostId, PostWithOwner};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// A unique or foreign key constraint rejected the write.
        Conflict { field: String } => "post repository constraint violated on {field}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in id order with their owner's name.
    async fn list(&self) -> Result<Vec<PostWithOwner>, PostRepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: PostId) -> Result<Option<PostWithOwner>, PostRepositoryError>;

    /// Insert a post.
    async fn create(&self, post: &NewPost) -> Result<PostWithOwner, PostRepositoryError>;

    /// Apply `changes`; `Ok(None)` when the post does not exist.
    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<PostWithOwner>, PostRepositoryError>;

    /// Delete a post. `Ok(false)` when it does not exist.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}
