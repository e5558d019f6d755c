//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records live next
//! to the structs.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    PasswordDigest, Phone, PhoneId, Post, PostId, PostWithOwner, User, UserId, UserWithPhone,
};

use super::schema::{phones, posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Changeset for partial user updates; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the phones table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = phones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PhoneRow {
    pub id: i64,
    pub number: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating phone records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = phones)]
pub(crate) struct NewPhoneRow<'a> {
    pub number: &'a str,
    pub user_id: i64,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub user_id: Option<i64>,
}

/// Changeset for partial post updates; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub user_id: Option<Option<i64>>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            password: PasswordDigest::from_phc(row.password_hash),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PhoneRow> for Phone {
    fn from(row: PhoneRow) -> Self {
        Self {
            id: PhoneId::new(row.id),
            number: row.number,
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            title: row.title,
            description: row.description,
            user_id: row.user_id.map(UserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Combine a user row with its optional phone row.
pub(crate) fn user_with_phone(user: UserRow, phone: Option<PhoneRow>) -> UserWithPhone {
    UserWithPhone {
        user: user.into(),
        phone: phone.map(Into::into),
    }
}

/// Combine a post row with its owner's name.
pub(crate) fn post_with_owner(post: PostRow, owner_name: Option<String>) -> PostWithOwner {
    PostWithOwner {
        post: post.into(),
        owner_name,
    }
}
