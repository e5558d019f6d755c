//! Driving port for post writes.

use async_trait::async_trait;

use crate::domain::{Error, FieldMap, PostId, PostWithOwner};

/// Domain use-case port for creating, updating and deleting posts.
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Validate and store a new post.
    async fn create_post(&self, fields: FieldMap) -> Result<PostWithOwner, Error>;

    /// Validate and apply a partial update to an existing post.
    async fn update_post(&self, id: PostId, fields: FieldMap) -> Result<PostWithOwner, Error>;

    /// Remove a post.
    async fn delete_post(&self, id: PostId) -> Result<(), Error>;
}
