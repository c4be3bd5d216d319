// src/handlers/warranties.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::warranty::{Warranty, WarrantyStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarrantyPayload {
    #[validate(length(min = 1, message = "Descreva o problema."))]
    pub description: String,

    // A quem a solicitação é endereçada. Pode ficar em aberto.
    pub manufacturer_id: Option<Uuid>,

    // O bem registrado sobre o qual se reclama.
    pub inventory_item_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarrantyPayload {
    #[validate(length(min = 1, message = "A descrição não pode ficar vazia."))]
    pub description: Option<String>,

    pub manufacturer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusPayload {
    pub status: WarrantyStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListWarrantiesQuery {
    pub status: Option<WarrantyStatus>,
}

// POST /api/warranties
#[utoipa::path(
    post,
    path = "/api/warranties",
    tag = "Warranties",
    request_body = CreateWarrantyPayload,
    responses(
        (status = 201, description = "Solicitação aberta", body = Warranty),
        (status = 404, description = "Fabricante ou item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_warranty(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateWarrantyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let warranty = app_state
        .warranty_service
        .create(
            user.0.id,
            payload.manufacturer_id,
            payload.inventory_item_id,
            &payload.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(warranty)))
}

// GET /api/warranties
#[utoipa::path(
    get,
    path = "/api/warranties",
    tag = "Warranties",
    params(ListWarrantiesQuery),
    responses(
        (status = 200, description = "Solicitações visíveis para o usuário", body = Vec<Warranty>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_warranties(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListWarrantiesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let warranties = app_state
        .warranty_service
        .list(user.0.id, query.status)
        .await?;

    Ok((StatusCode::OK, Json(warranties)))
}

// GET /api/warranties/{id}
#[utoipa::path(
    get,
    path = "/api/warranties/{id}",
    tag = "Warranties",
    params(("id" = Uuid, Path, description = "ID da garantia")),
    responses(
        (status = 200, description = "Solicitação de garantia", body = Warranty),
        (status = 403, description = "Sem autorização sobre a garantia"),
        (status = 404, description = "Garantia não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_warranty(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let warranty = app_state.warranty_service.get(user.0.id, id).await?;
    Ok((StatusCode::OK, Json(warranty)))
}

// PUT /api/warranties/{id}
#[utoipa::path(
    put,
    path = "/api/warranties/{id}",
    tag = "Warranties",
    request_body = UpdateWarrantyPayload,
    params(("id" = Uuid, Path, description = "ID da garantia")),
    responses(
        (status = 200, description = "Solicitação atualizada", body = Warranty),
        (status = 403, description = "Sem autorização sobre a garantia"),
        (status = 404, description = "Garantia não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_warranty(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWarrantyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let warranty = app_state
        .warranty_service
        .update(
            user.0.id,
            id,
            payload.description.as_deref(),
            payload.manufacturer_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(warranty)))
}

// PUT /api/warranties/{id}/status
#[utoipa::path(
    put,
    path = "/api/warranties/{id}/status",
    tag = "Warranties",
    request_body = SetStatusPayload,
    params(("id" = Uuid, Path, description = "ID da garantia")),
    responses(
        (status = 200, description = "Status alterado", body = Warranty),
        (status = 403, description = "Sem autorização sobre a garantia"),
        (status = 404, description = "Garantia não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_warranty_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let warranty = app_state
        .warranty_service
        .set_status(user.0.id, id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(warranty)))
}

// DELETE /api/warranties/{id}
#[utoipa::path(
    delete,
    path = "/api/warranties/{id}",
    tag = "Warranties",
    params(("id" = Uuid, Path, description = "ID da garantia")),
    responses(
        (status = 204, description = "Solicitação excluída"),
        (status = 403, description = "Sem autorização sobre a garantia")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_warranty(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.warranty_service.delete(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
