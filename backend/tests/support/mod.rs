//! Shared helpers for the Diesel adapter integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! embedded PostgreSQL bootstrap lives here and each suite pulls it in with
//! `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::PgContext;

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `postgres::Error` `Display` implementation often collapses database
/// errors to a generic `db error`, which hides the message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Fresh migrated database, or `None` when `SKIP_TEST_CLUSTER` allows
/// skipping a cluster that failed to start.
pub fn pg_context() -> Option<PgContext> {
    match PgContext::setup() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
