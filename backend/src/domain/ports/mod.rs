//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`RecordLookup`]) are implemented by outbound
//! adapters. Driving ports (`*Command`, `*Query`) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod phone_repository;
mod phones_query;
mod post_repository;
mod posts_command;
mod posts_query;
mod record_lookup;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use phone_repository::MockPhoneRepository;
pub use phone_repository::{PhoneRepository, PhoneRepositoryError};
pub use phones_query::PhonesQuery;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
pub use posts_command::PostsCommand;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use record_lookup::MockRecordLookup;
pub use record_lookup::{RecordLookup, RecordLookupError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
