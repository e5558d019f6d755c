//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::{Error, PostId, PostWithOwner};

/// Domain use-case port for listing and fetching posts.
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts with their owner's name.
    async fn list_posts(&self) -> Result<Vec<PostWithOwner>, Error>;

    /// One post, or `NotFound`.
    async fn get_post(&self, id: PostId) -> Result<PostWithOwner, Error>;
}
