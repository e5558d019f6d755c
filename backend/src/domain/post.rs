//! Post records and their write commands.

use chrono::{DateTime, Utc};

use super::record_id::define_record_id;
use super::user::UserId;

define_record_id!(
    /// Identifier of a stored post.
    PostId
);

/// Stored post.
///
/// `user_id` is cleared when the owning user is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    /// Unique across posts.
    pub title: String,
    pub description: String,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post together with the display name of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithOwner {
    pub post: Post,
    pub owner_name: Option<String>,
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub user_id: Option<UserId>,
}

/// Partial update of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<UserId>,
}

impl PostChanges {
    /// True when no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.user_id.is_none()
    }
}
