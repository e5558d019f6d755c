//! Phone lookups.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PhoneRepository, PhoneRepositoryError, PhonesQuery};
use crate::domain::{Error, PhoneId, PhoneWithOwner};

/// Phone service implementing [`PhonesQuery`].
#[derive(Clone)]
pub struct PhoneService<R> {
    phones: Arc<R>,
}

impl<R> PhoneService<R> {
    /// Create a new service with the given repository.
    pub fn new(phones: Arc<R>) -> Self {
        Self { phones }
    }
}

fn map_phone_repository_error(error: PhoneRepositoryError) -> Error {
    match error {
        PhoneRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("phone repository unavailable: {message}"))
        }
        PhoneRepositoryError::Query { message } => {
            Error::internal(format!("phone repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> PhonesQuery for PhoneService<R>
where
    R: PhoneRepository,
{
    async fn get_phone(&self, id: PhoneId) -> Result<PhoneWithOwner, Error> {
        self.phones
            .find_by_id(id)
            .await
            .map_err(map_phone_repository_error)?
            .ok_or_else(|| Error::not_found(format!("phone {id} not found")))
    }
}
