//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users {"name":"Lam","email":"lam@x.com","password":"secret1","number":"0987654321"}
//! GET    /api/users/{id}
//! PUT    /api/users/{id} {"name":"Lam N"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{FieldMap, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{IdPath, MessageResponse, UserEnvelope, UserResponse};
use crate::inbound::http::path::resolve_id;
use crate::inbound::http::schemas::{CreateUserRequestSchema, ErrorSchema, UpdateUserRequestSchema};
use crate::inbound::http::state::HttpState;

/// List every user with its phone.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use postbook::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users with their phones", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a user, and its phone when `number` is supplied.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequestSchema,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 409, description = "Concurrent write took the email", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<FieldMap>,
) -> ApiResult<HttpResponse> {
    let created = state.users.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(UserEnvelope {
        message: "User created successfully.".to_owned(),
        data: created.into(),
    }))
}

/// Fetch one user with its phone.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User with phone", body = UserResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = resolve_id(&path.id, "user")?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(user.into()))
}

/// Apply a partial update; `number` upserts the phone.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserRequestSchema,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Concurrent write took the email", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
    payload: web::Json<FieldMap>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id: UserId = resolve_id(&path.id, "user")?;
    let updated = state.users.update_user(id, payload.into_inner()).await?;
    Ok(web::Json(UserEnvelope {
        message: "User updated successfully.".to_owned(),
        data: updated.into(),
    }))
}

/// Delete a user. Its phone is removed and its posts are detached.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: UserId = resolve_id(&path.id, "user")?;
    state.users.delete_user(id).await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully.")))
}
