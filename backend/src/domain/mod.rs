//! Domain primitives, services and ports.
//!
//! Purpose: hold the entities (users, phones, posts), the request validator,
//! and the services that implement the driving ports. Nothing here knows about
//! HTTP or SQL; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - User, Phone, Post and their write commands.
//! - RuleSet / Rule / validate — field map validation.
//! - UserService, PostService, PhoneService — driving port implementations.

pub mod error;
pub mod password;
pub mod phone;
pub mod phone_service;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod record_id;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{PasswordDigest, PasswordError};
pub use self::phone::{Phone, PhoneId, PhoneWithOwner};
pub use self::phone_service::PhoneService;
pub use self::post::{NewPost, Post, PostChanges, PostId, PostWithOwner};
pub use self::post_service::{PostService, create_post_rules, update_post_rules};
pub use self::record_id::RecordIdError;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserChanges, UserId, UserWithPhone};
pub use self::user_service::{UserService, create_user_rules, update_user_rules};
pub use self::validation::{
    FieldMap, FieldViolation, LookupValue, RecordColumn, Rule, RuleSet, ValidatedFields,
    ValidationErrors, ValidationFailure, validate,
};
