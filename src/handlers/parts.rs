// src/handlers/parts.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ManufacturerStaff, RequireAnyRole},
    },
    models::catalog::Part,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartPayload {
    #[validate(length(min = 1, message = "O nome da peça é obrigatório."))]
    pub name: String,

    pub manufacturer_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub part_code: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartPayload {
    #[validate(length(min = 1, message = "O nome da peça não pode ficar vazio."))]
    pub name: Option<String>,

    pub part_code: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPartsQuery {
    pub q: Option<String>,
}

// POST /api/parts
#[utoipa::path(
    post,
    path = "/api/parts",
    tag = "Parts",
    request_body = CreatePartPayload,
    responses(
        (status = 201, description = "Peça criada", body = Part),
        (status = 403, description = "Fabricante ou produto fora do alcance")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_part(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Json(payload): Json<CreatePartPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let part = app_state
        .catalog_service
        .create_part(
            user.0.id,
            payload.manufacturer_id,
            payload.product_id,
            &payload.name,
            payload.part_code.as_deref(),
            payload.price,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(part)))
}

// GET /api/parts
#[utoipa::path(
    get,
    path = "/api/parts",
    tag = "Parts",
    params(ListPartsQuery),
    responses(
        (status = 200, description = "Peças visíveis para o usuário", body = Vec<Part>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_parts(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Query(query): Query<ListPartsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let parts = app_state
        .catalog_service
        .list_parts(user.0.id, query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(parts)))
}

// GET /api/parts/{id}
#[utoipa::path(
    get,
    path = "/api/parts/{id}",
    tag = "Parts",
    params(("id" = Uuid, Path, description = "ID da peça")),
    responses(
        (status = 200, description = "Peça", body = Part),
        (status = 403, description = "Sem autorização sobre a peça"),
        (status = 404, description = "Peça não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_part(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let part = app_state.catalog_service.get_part(user.0.id, id).await?;
    Ok((StatusCode::OK, Json(part)))
}

// PUT /api/parts/{id}
#[utoipa::path(
    put,
    path = "/api/parts/{id}",
    tag = "Parts",
    request_body = UpdatePartPayload,
    params(("id" = Uuid, Path, description = "ID da peça")),
    responses(
        (status = 200, description = "Peça atualizada", body = Part),
        (status = 403, description = "Sem autorização sobre a peça"),
        (status = 404, description = "Peça não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_part(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePartPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let part = app_state
        .catalog_service
        .update_part(
            user.0.id,
            id,
            payload.name.as_deref(),
            payload.part_code.as_deref(),
            payload.price,
        )
        .await?;

    Ok((StatusCode::OK, Json(part)))
}

// DELETE /api/parts/{id}
#[utoipa::path(
    delete,
    path = "/api/parts/{id}",
    tag = "Parts",
    params(("id" = Uuid, Path, description = "ID da peça")),
    responses(
        (status = 204, description = "Peça excluída"),
        (status = 403, description = "Sem autorização sobre a peça"),
        (status = 409, description = "Peça ainda possui itens de inventário")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_part(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_part(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
