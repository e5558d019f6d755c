//! Shared Diesel error mapping for the repositories.
//!
//! Repositories pass their port error constructors in; this module decides
//! which one applies and logs the underlying database failure at debug level.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Request field guarded by the constraint a write violated, if it is one of
/// the constraints clients can trip by racing each other.
pub fn violated_field(error: &DieselError) -> Option<&'static str> {
    let DieselError::DatabaseError(
        DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
        info,
    ) = error
    else {
        return None;
    };

    let field = match info.constraint_name()? {
        "users_email_key" => "email",
        "posts_title_key" => "title",
        "phones_user_id_key" | "posts_user_id_fkey" | "phones_user_id_fkey" => "user_id",
        _ => return None,
    };
    debug!(
        constraint = info.constraint_name(),
        field, "write rejected by constraint"
    );
    Some(field)
}

/// Map write-path Diesel errors, routing constraint violations to `conflict`.
pub fn map_write_diesel_error<E, Q, C, F>(
    error: DieselError,
    query: Q,
    connection: C,
    conflict: F,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    F: FnOnce(&'static str) -> E,
{
    match violated_field(&error) {
        Some(field) => conflict(field),
        None => map_basic_diesel_error(error, query, connection),
    }
}
