//! Phone records. Each user owns at most one phone.

use chrono::{DateTime, Utc};

use super::record_id::define_record_id;
use super::user::{User, UserId};

define_record_id!(
    /// Identifier of a stored phone.
    PhoneId
);

/// Stored phone, keyed one-to-one on its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: PhoneId,
    pub number: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A phone together with its owning user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneWithOwner {
    pub phone: Phone,
    pub owner: User,
}
