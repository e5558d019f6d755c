//! Port abstraction for reading phones.

use async_trait::async_trait;

use crate::domain::{PhoneId, PhoneWithOwner};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by phone repository adapters.
    pub enum PhoneRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "phone repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "phone repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhoneRepository: Send + Sync {
    /// Fetch a phone and its owner.
    async fn find_by_id(&self, id: PhoneId) -> Result<Option<PhoneWithOwner>, PhoneRepositoryError>;
}
