//! Phones API handler. Phones are written through their owning user.

use actix_web::{get, web};

use crate::domain::PhoneId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{IdPath, PhoneDetailResponse};
use crate::inbound::http::path::resolve_id;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Fetch one phone with its owning user.
#[utoipa::path(
    get,
    path = "/api/phones/{id}",
    params(("id" = i64, Path, description = "Phone identifier")),
    responses(
        (status = 200, description = "Phone with owner", body = PhoneDetailResponse),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["phones"],
    operation_id = "getPhone"
)]
#[get("/phones/{id}")]
pub async fn get_phone(
    state: web::Data<HttpState>,
    path: web::Path<IdPath>,
) -> ApiResult<web::Json<PhoneDetailResponse>> {
    let id: PhoneId = resolve_id(&path.id, "phone")?;
    let phone = state.phones_query.get_phone(id).await?;
    Ok(web::Json(phone.into()))
}
