//! User domain service.
//!
//! Implements the user driving ports: validates incoming field maps, hashes
//! passwords, and delegates persistence to a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    RecordLookup, UserRepository, UserRepositoryError, UsersCommand, UsersQuery,
};
use crate::domain::{
    Error, FieldMap, NewUser, PasswordDigest, PasswordError, RecordColumn, Rule, RuleSet,
    UserChanges, UserId, UserWithPhone, ValidatedFields, validate,
};

/// Rules applied when creating a user.
#[must_use]
pub fn create_user_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "name",
            [Rule::Required, Rule::String, Rule::Min(3), Rule::Max(15)],
        )
        .field(
            "email",
            [
                Rule::Required,
                Rule::String,
                Rule::Email,
                Rule::Max(255),
                Rule::Unique(RecordColumn::UserEmail),
            ],
        )
        .field_raw("password", [Rule::Required, Rule::String, Rule::Min(6)])
        .field("number", [Rule::String, Rule::Max(20)])
}

/// Rules applied when updating a user. Every field is optional.
#[must_use]
pub fn update_user_rules() -> RuleSet {
    create_user_rules().optional()
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R, L> {
    users: Arc<R>,
    lookup: Arc<L>,
}

impl<R, L> UserService<R, L> {
    /// Create a new service with the given repository and record lookup.
    pub fn new(users: Arc<R>, lookup: Arc<L>) -> Self {
        Self { users, lookup }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Conflict { field } => {
            Error::conflict(format!("the {field} is already in use"))
        }
    }
}

fn map_password_error(error: PasswordError) -> Error {
    Error::internal(error.to_string())
}

/// Hash the accepted password on the blocking pool; Argon2id is CPU-bound.
async fn hash_password(accepted: &ValidatedFields) -> Result<Option<PasswordDigest>, Error> {
    let Some(plain) = accepted.text("password") else {
        return Ok(None);
    };
    let digest = tokio::task::spawn_blocking(move || PasswordDigest::hash(&plain))
        .await
        .map_err(|error| Error::internal(format!("password hashing task failed: {error}")))?
        .map_err(map_password_error)?;
    Ok(Some(digest))
}

impl<R, L> UserService<R, L>
where
    R: UserRepository,
    L: RecordLookup,
{
    async fn existing_user(&self, id: UserId) -> Result<UserWithPhone, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R, L> UsersQuery for UserService<R, L>
where
    R: UserRepository,
    L: RecordLookup,
{
    async fn list_users(&self) -> Result<Vec<UserWithPhone>, Error> {
        self.users.list().await.map_err(map_user_repository_error)
    }

    async fn get_user(&self, id: UserId) -> Result<UserWithPhone, Error> {
        self.existing_user(id).await
    }
}

#[async_trait]
impl<R, L> UsersCommand for UserService<R, L>
where
    R: UserRepository,
    L: RecordLookup,
{
    async fn create_user(&self, fields: FieldMap) -> Result<UserWithPhone, Error> {
        let accepted = validate(&create_user_rules(), &fields, self.lookup.as_ref(), None).await?;

        let password = hash_password(&accepted)
            .await?
            .ok_or_else(|| Error::internal("validated field `password` is missing"))?;
        let new_user = NewUser {
            name: accepted.require_text("name")?,
            email: accepted.require_text("email")?,
            password,
            number: accepted.text("number"),
        };

        let created = self
            .users
            .create(&new_user)
            .await
            .map_err(map_user_repository_error)?;
        info!(
            user_id = %created.user.id,
            with_phone = created.phone.is_some(),
            "user created"
        );
        Ok(created)
    }

    async fn update_user(&self, id: UserId, fields: FieldMap) -> Result<UserWithPhone, Error> {
        let existing = self.existing_user(id).await?;
        let accepted = validate(
            &update_user_rules(),
            &fields,
            self.lookup.as_ref(),
            Some(id.get()),
        )
        .await?;

        let changes = UserChanges {
            name: accepted.text("name"),
            email: accepted.text("email"),
            password: hash_password(&accepted).await?,
            number: accepted.text("number"),
        };
        if changes.is_empty() {
            return Ok(existing);
        }

        let updated = self
            .users
            .update(id, &changes)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(map_user_repository_error)?;
        if !deleted {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
