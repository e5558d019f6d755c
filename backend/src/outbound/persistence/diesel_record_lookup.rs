//! PostgreSQL-backed `RecordLookup` answering `unique` and `exists` rules.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordLookup, RecordLookupError};
use crate::domain::{LookupValue, RecordColumn};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the [`RecordLookup`] port.
#[derive(Clone)]
pub struct DieselRecordLookup {
    pool: DbPool,
}

impl DieselRecordLookup {
    /// Create a new lookup with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordLookupError {
    map_basic_pool_error(error, RecordLookupError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecordLookupError {
    map_basic_diesel_error(error, RecordLookupError::query, RecordLookupError::connection)
}

#[async_trait]
impl RecordLookup for DieselRecordLookup {
    async fn value_exists(
        &self,
        column: RecordColumn,
        value: &LookupValue,
        ignore_id: Option<i64>,
    ) -> Result<bool, RecordLookupError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<i64> = match (column, value) {
            (RecordColumn::UserEmail, LookupValue::Text(email)) => {
                let mut query = users::table
                    .filter(users::email.eq(email.as_str()))
                    .select(users::id)
                    .into_boxed();
                if let Some(ignore) = ignore_id {
                    query = query.filter(users::id.ne(ignore));
                }
                query.first(&mut conn).await.optional()
            }
            (RecordColumn::UserId, LookupValue::Integer(id)) => {
                let mut query = users::table
                    .filter(users::id.eq(*id))
                    .select(users::id)
                    .into_boxed();
                if let Some(ignore) = ignore_id {
                    query = query.filter(users::id.ne(ignore));
                }
                query.first(&mut conn).await.optional()
            }
            (RecordColumn::PostTitle, LookupValue::Text(title)) => {
                let mut query = posts::table
                    .filter(posts::title.eq(title.as_str()))
                    .select(posts::id)
                    .into_boxed();
                if let Some(ignore) = ignore_id {
                    query = query.filter(posts::id.ne(ignore));
                }
                query.first(&mut conn).await.optional()
            }
            // A text id or a numeric email can never match a stored row.
            _ => Ok(None),
        }
        .map_err(map_diesel_error)?;

        Ok(found.is_some())
    }
}
