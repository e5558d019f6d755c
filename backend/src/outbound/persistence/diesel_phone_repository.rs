//! PostgreSQL-backed `PhoneRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PhoneRepository, PhoneRepositoryError};
use crate::domain::{PhoneId, PhoneWithOwner};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{PhoneRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{phones, users};

/// Diesel-backed implementation of the [`PhoneRepository`] port.
#[derive(Clone)]
pub struct DieselPhoneRepository {
    pool: DbPool,
}

impl DieselPhoneRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PhoneRepositoryError {
    map_basic_pool_error(error, PhoneRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PhoneRepositoryError {
    map_basic_diesel_error(
        error,
        PhoneRepositoryError::query,
        PhoneRepositoryError::connection,
    )
}

#[async_trait]
impl PhoneRepository for DieselPhoneRepository {
    async fn find_by_id(&self, id: PhoneId) -> Result<Option<PhoneWithOwner>, PhoneRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(PhoneRow, UserRow)> = phones::table
            .inner_join(users::table)
            .filter(phones::id.eq(id.get()))
            .select((PhoneRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(phone, owner)| PhoneWithOwner {
            phone: phone.into(),
            owner: owner.into(),
        }))
    }
}
