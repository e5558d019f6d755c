//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer (users, posts,
//!   phones, health)
//! - **Schemas**: the error wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]),
//!   the request body descriptions and the response DTOs
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::dto::{
    MessageResponse, PhoneDetailResponse, PhoneOwnerResponse, PhoneResponse, PostEnvelope,
    PostResponse, UserEnvelope, UserResponse,
};
use crate::inbound::http::schemas::{
    CreatePostRequestSchema, CreateUserRequestSchema, ErrorCodeSchema, ErrorSchema,
    UpdatePostRequestSchema, UpdateUserRequestSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postbook API",
        description = "CRUD endpoints for users, their phones and their posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::phones::get_phone,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserRequestSchema,
        UpdateUserRequestSchema,
        CreatePostRequestSchema,
        UpdatePostRequestSchema,
        UserResponse,
        PhoneResponse,
        PhoneOwnerResponse,
        PhoneDetailResponse,
        PostResponse,
        UserEnvelope,
        PostEnvelope,
        MessageResponse,
    )),
    tags(
        (name = "users", description = "Users and their phones"),
        (name = "posts", description = "Posts and their owners"),
        (name = "phones", description = "Read access to phones"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
