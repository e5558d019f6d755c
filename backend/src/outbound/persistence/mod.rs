//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports backed by PostgreSQL
//! through `diesel-async` and a `bb8` connection pool.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   records. Validation and status decisions live in the domain services.
//! - Row structs (`models.rs`) and the table definitions (`schema.rs`) stay
//!   private to this module.
//! - Database failures are mapped onto the port error types; constraint
//!   violations that clients can race into become conflicts.
//!
//! # Example
//!
//! ```ignore
//! use postbook::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/postbook");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_phone_repository;
mod diesel_post_repository;
mod diesel_record_lookup;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_phone_repository::DieselPhoneRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_record_lookup::DieselRecordLookup;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
