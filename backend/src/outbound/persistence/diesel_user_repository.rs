//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Users are read through a left join on `phones`. Writes that carry a phone
//! number run the user and phone statements in one transaction, with the
//! phone upserted on its unique `user_id`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, UserChanges, UserId, UserWithPhone};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_write_diesel_error};
use super::models::{NewPhoneRow, NewUserRow, PhoneRow, UserChangeset, UserRow, user_with_phone};
use super::pool::{DbPool, PoolError};
use super::schema::{phones, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_write_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
        UserRepositoryError::conflict,
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<UserWithPhone>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(UserRow, Option<PhoneRow>)> = users::table
            .left_join(phones::table)
            .order(users::id.asc())
            .select((UserRow::as_select(), Option::<PhoneRow>::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(user, phone)| user_with_phone(user, phone))
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserWithPhone>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(UserRow, Option<PhoneRow>)> = users::table
            .left_join(phones::table)
            .filter(users::id.eq(id.get()))
            .select((UserRow::as_select(), Option::<PhoneRow>::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(user, phone)| user_with_phone(user, phone)))
    }

    async fn create(&self, user: &NewUser) -> Result<UserWithPhone, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_row = NewUserRow {
            name: &user.name,
            email: &user.email,
            password_hash: user.password.as_phc(),
        };
        let number = user.number.as_deref();

        let (created, phone) = conn
            .transaction(|conn| {
                async move {
                    let created: UserRow = diesel::insert_into(users::table)
                        .values(&user_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let phone: Option<PhoneRow> = match number {
                        Some(number) => Some(
                            diesel::insert_into(phones::table)
                                .values(&NewPhoneRow {
                                    number,
                                    user_id: created.id,
                                })
                                .returning(PhoneRow::as_returning())
                                .get_result(conn)
                                .await?,
                        ),
                        None => None,
                    };

                    Ok((created, phone))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(user_with_phone(created, phone))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<UserWithPhone>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = Utc::now();
        let changeset = UserChangeset {
            name: changes.name.as_deref(),
            email: changes.email.as_deref(),
            password_hash: changes.password.as_ref().map(|digest| digest.as_phc()),
            updated_at: now,
        };
        let number = changes.number.as_deref();
        let user_id = id.get();

        conn.transaction(|conn| {
            async move {
                let updated: Option<UserRow> = diesel::update(users::table.find(user_id))
                    .set(&changeset)
                    .returning(UserRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(updated) = updated else {
                    return Ok(None);
                };

                let phone: Option<PhoneRow> = match number {
                    Some(number) => Some(
                        diesel::insert_into(phones::table)
                            .values(&NewPhoneRow { number, user_id })
                            .on_conflict(phones::user_id)
                            .do_update()
                            .set((phones::number.eq(number), phones::updated_at.eq(now)))
                            .returning(PhoneRow::as_returning())
                            .get_result(conn)
                            .await?,
                    ),
                    None => phones::table
                        .filter(phones::user_id.eq(user_id))
                        .select(PhoneRow::as_select())
                        .first(conn)
                        .await
                        .optional()?,
                };

                Ok(Some(user_with_phone(updated, phone)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The phone cascades and owned posts are detached by the foreign keys.
        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
