//! Posts API handlers.
//!
//! ```text
//! GET    /api/posts
//! POST   /api/posts {"title":"Hello world","description":"First post body","user_id":1}
//! GET    /api/posts/{id}
//! PUT    /api/posts/{id} {"description":"Rewritten body"}
//! DELETE /api/posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{FieldMap, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{IdPath, MessageResponse, PostEnvelope, PostResponse};
use crate::inbound::http::path::resolve_id;
use crate::inbound::http::schemas::{CreatePostRequestSchema, ErrorSchema, UpdatePostRequestSchema};
use crate::inbound::http::state::HttpState;

/// List every post with its owner's name.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "Posts", body = [PostResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Create a post, optionally owned by an existing user.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequestSchema,
    responses(
        (status = 201, description = "Post created", body = PostEnvelope),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 409, description = "Concurrent write took the title", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<FieldMap>,
) -> ApiResult<HttpResponse> {
    let created = state.posts.create_post(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(PostEnvelope {
        message: "Post created successfully.".to_owned(),
        data: created.into(),
    }))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
) -> ApiResult<web::Json<PostResponse>> {
    let id: PostId = resolve_id(&path.id, "post")?;
    let post = state.posts_query.get_post(id).await?;
    Ok(web::Json(post.into()))
}

/// Apply a partial update to a post.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = UpdatePostRequestSchema,
    responses(
        (status = 200, description = "Post updated", body = PostEnvelope),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Concurrent write took the title", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
    payload: web::Json<FieldMap>,
) -> ApiResult<web::Json<PostEnvelope>> {
    let id: PostId = resolve_id(&path.id, "post")?;
    let updated = state.posts.update_post(id, payload.into_inner()).await?;
    Ok(web::Json(PostEnvelope {
        message: "Post updated successfully.".to_owned(),
        data: updated.into(),
    }))
}

/// Delete a post.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: PostId = resolve_id(&path.id, "post")?;
    state.posts.delete_post(id).await?;
    Ok(web::Json(MessageResponse::new("Post deleted successfully.")))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
