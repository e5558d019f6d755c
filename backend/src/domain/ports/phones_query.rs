//! Driving port for phone reads.

use async_trait::async_trait;

use crate::domain::{Error, PhoneId, PhoneWithOwner};

/// Domain use-case port for fetching a phone with its owner.
#[async_trait]
pub trait PhonesQuery: Send + Sync {
    /// One phone with its owner, or `NotFound`.
    async fn get_phone(&self, id: PhoneId) -> Result<PhoneWithOwner, Error>;
}
