//! Driven port answering `unique` and `exists` validation rules.

use async_trait::async_trait;

use crate::domain::{LookupValue, RecordColumn};

use super::define_port_error;

define_port_error! {
    /// Errors raised while looking up stored values.
    pub enum RecordLookupError {
        /// The backing store could not be reached.
        Connection { message: String } => "record lookup connection failed: {message}",
        /// The lookup query failed during execution.
        Query { message: String } => "record lookup query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordLookup: Send + Sync {
    /// Whether any stored row holds `value` in `column`, skipping the row
    /// whose primary key equals `ignore_id`.
    async fn value_exists(
        &self,
        column: RecordColumn,
        value: &LookupValue,
        ignore_id: Option<i64>,
    ) -> Result<bool, RecordLookupError>;
}
