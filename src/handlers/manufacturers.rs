// src/handlers/manufacturers.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ManufacturerStaff, RequireAnyRole},
    },
    models::manufacturer::{Manufacturer, ManufacturerDelegate, ManufacturerStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateManufacturerPayload {
    #[validate(length(min = 1, message = "O nome do fabricante é obrigatório."))]
    pub name: String,

    pub tax_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManufacturerPayload {
    #[validate(length(min = 1, message = "O nome do fabricante não pode ficar vazio."))]
    pub name: Option<String>,

    pub tax_id: Option<String>,

    pub status: Option<ManufacturerStatus>,

    // Só um admin consegue trocar o apoderado.
    pub legal_representative_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDelegatePayload {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListManufacturersQuery {
    // Filtra o escopo pela variante estreita do resolvedor.
    pub status: Option<ManufacturerStatus>,
}

// POST /api/manufacturers
#[utoipa::path(
    post,
    path = "/api/manufacturers",
    tag = "Manufacturers",
    request_body = CreateManufacturerPayload,
    responses(
        (status = 201, description = "Fabricante criado", body = Manufacturer),
        (status = 403, description = "Papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_manufacturer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Json(payload): Json<CreateManufacturerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let manufacturer = app_state
        .manufacturer_service
        .create(&user.0, &payload.name, payload.tax_id.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(manufacturer)))
}

// GET /api/manufacturers
#[utoipa::path(
    get,
    path = "/api/manufacturers",
    tag = "Manufacturers",
    params(ListManufacturersQuery),
    responses(
        (status = 200, description = "Fabricantes no escopo do usuário", body = Vec<Manufacturer>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_manufacturers(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Query(query): Query<ListManufacturersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let manufacturers = app_state
        .manufacturer_service
        .list(user.0.id, query.status)
        .await?;

    Ok((StatusCode::OK, Json(manufacturers)))
}

// GET /api/manufacturers/{id}
#[utoipa::path(
    get,
    path = "/api/manufacturers/{id}",
    tag = "Manufacturers",
    params(("id" = Uuid, Path, description = "ID do fabricante")),
    responses(
        (status = 200, description = "Fabricante", body = Manufacturer),
        (status = 403, description = "Sem autorização sobre o fabricante"),
        (status = 404, description = "Fabricante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_manufacturer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let manufacturer = app_state.manufacturer_service.get(&user.0, id).await?;
    Ok((StatusCode::OK, Json(manufacturer)))
}

// PUT /api/manufacturers/{id}
#[utoipa::path(
    put,
    path = "/api/manufacturers/{id}",
    tag = "Manufacturers",
    request_body = UpdateManufacturerPayload,
    params(("id" = Uuid, Path, description = "ID do fabricante")),
    responses(
        (status = 200, description = "Fabricante atualizado", body = Manufacturer),
        (status = 403, description = "Sem autorização"),
        (status = 404, description = "Fabricante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_manufacturer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateManufacturerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let manufacturer = app_state
        .manufacturer_service
        .update(
            &user.0,
            id,
            payload.name.as_deref(),
            payload.tax_id.as_deref(),
            payload.status,
            payload.legal_representative_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(manufacturer)))
}

// DELETE /api/manufacturers/{id}
#[utoipa::path(
    delete,
    path = "/api/manufacturers/{id}",
    tag = "Manufacturers",
    params(("id" = Uuid, Path, description = "ID do fabricante")),
    responses(
        (status = 204, description = "Fabricante excluído"),
        (status = 403, description = "Sem autorização"),
        (status = 409, description = "Fabricante ainda possui dependentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_manufacturer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.manufacturer_service.delete(&user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  DELEGADOS
// =============================================================================

// GET /api/manufacturers/{id}/delegates
#[utoipa::path(
    get,
    path = "/api/manufacturers/{id}/delegates",
    tag = "Manufacturers",
    params(("id" = Uuid, Path, description = "ID do fabricante")),
    responses(
        (status = 200, description = "Delegados do fabricante", body = Vec<ManufacturerDelegate>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_delegates(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let delegates = app_state
        .manufacturer_service
        .list_delegates(&user.0, id)
        .await?;

    Ok((StatusCode::OK, Json(delegates)))
}

// POST /api/manufacturers/{id}/delegates
#[utoipa::path(
    post,
    path = "/api/manufacturers/{id}/delegates",
    tag = "Manufacturers",
    request_body = AddDelegatePayload,
    params(("id" = Uuid, Path, description = "ID do fabricante")),
    responses(
        (status = 204, description = "Delegado adicionado"),
        (status = 403, description = "Só o apoderado ou um admin delega"),
        (status = 404, description = "Fabricante ou usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_delegate(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddDelegatePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .manufacturer_service
        .add_delegate(&user.0, id, payload.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/manufacturers/{id}/delegates/{user_id}
#[utoipa::path(
    delete,
    path = "/api/manufacturers/{id}/delegates/{user_id}",
    tag = "Manufacturers",
    params(
        ("id" = Uuid, Path, description = "ID do fabricante"),
        ("user_id" = Uuid, Path, description = "ID do usuário delegado")
    ),
    responses(
        (status = 204, description = "Delegado removido"),
        (status = 403, description = "Só o apoderado ou um admin delega"),
        (status = 404, description = "Delegado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_delegate(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .manufacturer_service
        .remove_delegate(&user.0, id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
