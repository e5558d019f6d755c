//! Response payloads and path extractors shared by the resource handlers.
//!
//! Timestamps are rendered as RFC 3339 strings. Password digests never leave
//! the domain layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Phone, PhoneWithOwner, PostWithOwner, User, UserWithPhone};

/// Raw `{id}` path segment; resolved into a typed id by the handler.
#[derive(Debug, Deserialize)]
pub struct IdPath {
    pub id: String,
}

/// Phone nested under its owning user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhoneResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "0987654321")]
    pub number: String,
    #[schema(example = 1)]
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// User with its optional phone.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Lam")]
    pub name: String,
    #[schema(example = "lam@example.com")]
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub phone: Option<PhoneResponse>,
}

/// User summary nested under a phone.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhoneOwnerResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Lam")]
    pub name: String,
    #[schema(example = "lam@example.com")]
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Phone with its owning user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhoneDetailResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "0987654321")]
    pub number: String,
    #[schema(example = 1)]
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub user: PhoneOwnerResponse,
}

/// Post with the name of its owner flattened into `created_by`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Hello world")]
    pub title: String,
    #[schema(example = "First post body")]
    pub description: String,
    #[schema(example = 1)]
    pub user_id: Option<i64>,
    #[schema(example = "Lam")]
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Confirmation message plus the written user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    #[schema(example = "User created successfully.")]
    pub message: String,
    pub data: UserResponse,
}

/// Confirmation message plus the written post.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostEnvelope {
    #[schema(example = "Post created successfully.")]
    pub message: String,
    pub data: PostResponse,
}

/// Bare confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User deleted successfully.")]
    pub message: String,
}

impl MessageResponse {
    pub(super) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<Phone> for PhoneResponse {
    fn from(phone: Phone) -> Self {
        Self {
            id: phone.id.get(),
            number: phone.number,
            user_id: phone.user_id.get(),
            created_at: phone.created_at.to_rfc3339(),
            updated_at: phone.updated_at.to_rfc3339(),
        }
    }
}

impl From<UserWithPhone> for UserResponse {
    fn from(record: UserWithPhone) -> Self {
        let UserWithPhone { user, phone } = record;
        Self {
            id: user.id.get(),
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
            phone: phone.map(PhoneResponse::from),
        }
    }
}

impl From<User> for PhoneOwnerResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

impl From<PhoneWithOwner> for PhoneDetailResponse {
    fn from(record: PhoneWithOwner) -> Self {
        let PhoneWithOwner { phone, owner } = record;
        Self {
            id: phone.id.get(),
            number: phone.number,
            user_id: phone.user_id.get(),
            created_at: phone.created_at.to_rfc3339(),
            updated_at: phone.updated_at.to_rfc3339(),
            user: owner.into(),
        }
    }
}

impl From<PostWithOwner> for PostResponse {
    fn from(record: PostWithOwner) -> Self {
        let PostWithOwner { post, owner_name } = record;
        Self {
            id: post.id.get(),
            title: post.title,
            description: post.description,
            user_id: post.user_id.map(i64::from),
            created_by: owner_name,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}
