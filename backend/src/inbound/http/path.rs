//! Path id resolution.

use std::str::FromStr;

use tracing::debug;

use crate::domain::{Error, RecordIdError};

/// Parse a raw `{id}` segment into a typed record id.
///
/// A segment that is not a positive integer cannot name a stored record, so it
/// is reported as `not_found` rather than as a malformed request.
pub(crate) fn resolve_id<T>(raw: &str, resource: &str) -> Result<T, Error>
where
    T: FromStr<Err = RecordIdError>,
{
    raw.parse().map_err(|err: RecordIdError| {
        debug!(error = %err, resource, "unresolvable path id");
        Error::not_found(format!("{resource} {raw} not found"))
    })
}
