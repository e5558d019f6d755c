//! User records and their write commands.

use chrono::{DateTime, Utc};

use super::password::PasswordDigest;
use super::phone::Phone;
use super::record_id::define_record_id;

define_record_id!(
    /// Identifier of a stored user.
    UserId
);

/// Stored user.
///
/// The password digest never leaves the domain; adapters that render users
/// must not expose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Globally unique.
    pub email: String,
    pub password: PasswordDigest,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with the phone it owns, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithPhone {
    pub user: User,
    pub phone: Option<Phone>,
}

/// Validated input for creating a user.
///
/// When `number` is present the phone is created in the same write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: PasswordDigest,
    pub number: Option<String>,
}

/// Partial update of a user. `None` leaves the stored value untouched.
///
/// A supplied `number` updates the owned phone or creates one when the user
/// has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<PasswordDigest>,
    pub number: Option<String>,
}

impl UserChanges {
    /// True when no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.number.is_none()
    }
}
