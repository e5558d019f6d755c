//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: an in-process store used when no database is configured.
//!
//! Adapters translate between domain records and storage representations and
//! carry no business logic.

pub mod memory;
pub mod persistence;
