//! OpenAPI schema definitions for domain types and request bodies.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`, and the
//! write handlers accept raw field maps so the validator sees every field. The
//! wrappers here describe those payloads for the generated document only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is not a JSON object.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// One or more fields broke their validation rules.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A concurrent write claimed a unique value first.
    #[schema(rename = "conflict")]
    Conflict,
    /// The backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message. Validation failures list every violation under
/// `details.errors`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "The given data was invalid.")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// Body of `POST /api/users`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateUserRequestSchema {
    /// 3 to 15 characters.
    #[schema(example = "Lam", min_length = 3, max_length = 15)]
    name: String,
    /// Unique across users, ignoring case. Stored lowercased.
    #[schema(example = "lam@example.com", max_length = 255)]
    email: String,
    /// At least 6 characters, surrounding whitespace included. Stored as an
    /// Argon2id hash.
    #[schema(example = "secret1", min_length = 6)]
    password: String,
    /// Creates the user's phone.
    #[schema(example = "0987654321", max_length = 20)]
    number: Option<String>,
}

/// Body of `PUT /api/users/{id}`. Omitted fields stay unchanged.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateUserRequestSchema {
    #[schema(example = "Lam N", min_length = 3, max_length = 15)]
    name: Option<String>,
    #[schema(example = "lam@example.com", max_length = 255)]
    email: Option<String>,
    #[schema(example = "secret2", min_length = 6)]
    password: Option<String>,
    /// Creates the phone if the user has none, else replaces its number.
    #[schema(example = "0987654321", max_length = 20)]
    number: Option<String>,
}

/// Body of `POST /api/posts`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreatePostRequestSchema {
    /// Unique across posts.
    #[schema(example = "Hello world", min_length = 5, max_length = 100)]
    title: String,
    #[schema(example = "First post body", min_length = 10, max_length = 50)]
    description: String,
    /// Owner; must name an existing user.
    #[schema(example = 1)]
    user_id: Option<i64>,
}

/// Body of `PUT /api/posts/{id}`. Omitted fields stay unchanged.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdatePostRequestSchema {
    #[schema(example = "Hello again", min_length = 5, max_length = 100)]
    title: Option<String>,
    #[schema(example = "Rewritten body", min_length = 10, max_length = 50)]
    description: Option<String>,
    #[schema(example = 1)]
    user_id: Option<i64>,
}
