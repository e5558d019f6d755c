//! Post domain service implementing the post driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    PostRepository, PostRepositoryError, PostsCommand, PostsQuery, RecordLookup,
};
use crate::domain::{
    Error, FieldMap, NewPost, PostChanges, PostId, PostWithOwner, RecordColumn, Rule, RuleSet,
    UserId, validate,
};

/// Rules applied when creating a post.
#[must_use]
pub fn create_post_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "title",
            [
                Rule::Required,
                Rule::String,
                Rule::Min(5),
                Rule::Max(100),
                Rule::Unique(RecordColumn::PostTitle),
            ],
        )
        .field(
            "description",
            [Rule::Required, Rule::String, Rule::Min(10), Rule::Max(50)],
        )
        .field("user_id", [Rule::Integer, Rule::Exists(RecordColumn::UserId)])
}

/// Rules applied when updating a post. Every field is optional.
#[must_use]
pub fn update_post_rules() -> RuleSet {
    create_post_rules().optional()
}

/// Post service implementing [`PostsCommand`] and [`PostsQuery`].
#[derive(Clone)]
pub struct PostService<R, L> {
    posts: Arc<R>,
    lookup: Arc<L>,
}

impl<R, L> PostService<R, L> {
    /// Create a new service with the given repository and record lookup.
    pub fn new(posts: Arc<R>, lookup: Arc<L>) -> Self {
        Self { posts, lookup }
    }
}

fn post_not_found(id: PostId) -> Error {
    Error::not_found(format!("post {id} not found"))
}

fn map_post_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::Conflict { field } => {
            Error::conflict(format!("the {field} conflicts with stored data"))
        }
    }
}

#[async_trait]
impl<R, L> PostsQuery for PostService<R, L>
where
    R: PostRepository,
    L: RecordLookup,
{
    async fn list_posts(&self) -> Result<Vec<PostWithOwner>, Error> {
        self.posts.list().await.map_err(map_post_repository_error)
    }

    async fn get_post(&self, id: PostId) -> Result<PostWithOwner, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| post_not_found(id))
    }
}

#[async_trait]
impl<R, L> PostsCommand for PostService<R, L>
where
    R: PostRepository,
    L: RecordLookup,
{
    async fn create_post(&self, fields: FieldMap) -> Result<PostWithOwner, Error> {
        let accepted = validate(&create_post_rules(), &fields, self.lookup.as_ref(), None).await?;
        let new_post = NewPost {
            title: accepted.require_text("title")?,
            description: accepted.require_text("description")?,
            user_id: accepted.integer("user_id").map(UserId::new),
        };

        let created = self
            .posts
            .create(&new_post)
            .await
            .map_err(map_post_repository_error)?;
        info!(post_id = %created.post.id, "post created");
        Ok(created)
    }

    async fn update_post(&self, id: PostId, fields: FieldMap) -> Result<PostWithOwner, Error> {
        let existing = self.get_post(id).await?;
        let accepted = validate(
            &update_post_rules(),
            &fields,
            self.lookup.as_ref(),
            Some(id.get()),
        )
        .await?;

        let changes = PostChanges {
            title: accepted.text("title"),
            description: accepted.text("description"),
            user_id: accepted.integer("user_id").map(UserId::new),
        };
        if changes.is_empty() {
            return Ok(existing);
        }

        let updated = self
            .posts
            .update(id, &changes)
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| post_not_found(id))?;
        info!(post_id = %id, "post updated");
        Ok(updated)
    }

    async fn delete_post(&self, id: PostId) -> Result<(), Error> {
        let deleted = self
            .posts
            .delete(id)
            .await
            .map_err(map_post_repository_error)?;
        if !deleted {
            return Err(post_not_found(id));
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
