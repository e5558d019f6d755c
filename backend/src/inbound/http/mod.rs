//! HTTP inbound adapter exposing the REST endpoints.

pub mod dto;
pub mod error;
pub mod health;
pub(crate) mod path;
pub mod phones;
pub mod posts;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The `/api` scope with every resource handler registered.
///
/// Bodies that fail to parse as a JSON object are answered with an
/// `invalid_request` envelope before reaching a handler.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_payload_error))
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(posts::list_posts)
        .service(posts::create_post)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(phones::get_phone)
}
