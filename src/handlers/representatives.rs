// src/handlers/representatives.rs

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
    models::{catalog::Brand, representative::Representative},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepresentativePayload {
    #[validate(length(min = 1, message = "O nome do representante é obrigatório."))]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepresentativePayload {
    #[validate(length(min = 1, message = "O nome do representante não pode ficar vazio."))]
    pub name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBrandPayload {
    pub brand_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRepresentativesQuery {
    pub q: Option<String>,
}

// POST /api/representatives
#[utoipa::path(
    post,
    path = "/api/representatives",
    tag = "Representatives",
    request_body = CreateRepresentativePayload,
    responses(
        (status = 201, description = "Representante criado", body = Representative)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_representative(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Json(payload): Json<CreateRepresentativePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let representative = app_state
        .representative_service
        .create(
            user.0.id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(representative)))
}

// GET /api/representatives
#[utoipa::path(
    get,
    path = "/api/representatives",
    tag = "Representatives",
    params(ListRepresentativesQuery),
    responses(
        (status = 200, description = "Representantes visíveis", body = Vec<Representative>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_representatives(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Query(query): Query<ListRepresentativesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let representatives = app_state
        .representative_service
        .list(user.0.id, query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(representatives)))
}

// GET /api/representatives/{id}
#[utoipa::path(
    get,
    path = "/api/representatives/{id}",
    tag = "Representatives",
    params(("id" = Uuid, Path, description = "ID do representante")),
    responses(
        (status = 200, description = "Representante", body = Representative),
        (status = 403, description = "Sem autorização sobre o representante"),
        (status = 404, description = "Representante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_representative(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let representative = app_state.representative_service.get(user.0.id, id).await?;
    Ok((StatusCode::OK, Json(representative)))
}

// PUT /api/representatives/{id}
#[utoipa::path(
    put,
    path = "/api/representatives/{id}",
    tag = "Representatives",
    request_body = UpdateRepresentativePayload,
    params(("id" = Uuid, Path, description = "ID do representante")),
    responses(
        (status = 200, description = "Representante atualizado", body = Representative),
        (status = 403, description = "Sem autorização sobre o representante"),
        (status = 404, description = "Representante não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_representative(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRepresentativePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let representative = app_state
        .representative_service
        .update(
            user.0.id,
            id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(representative)))
}

// DELETE /api/representatives/{id}
#[utoipa::path(
    delete,
    path = "/api/representatives/{id}",
    tag = "Representatives",
    params(("id" = Uuid, Path, description = "ID do representante")),
    responses(
        (status = 204, description = "Representante excluído"),
        (status = 403, description = "Sem autorização sobre o representante")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_representative(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .representative_service
        .delete(user.0.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  MARCAS ATENDIDAS
// =============================================================================

// GET /api/representatives/{id}/brands
#[utoipa::path(
    get,
    path = "/api/representatives/{id}/brands",
    tag = "Representatives",
    params(("id" = Uuid, Path, description = "ID do representante")),
    responses(
        (status = 200, description = "Marcas atendidas pelo representante", body = Vec<Brand>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_represented_brands(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let brands = app_state
        .representative_service
        .list_brands(user.0.id, id)
        .await?;

    Ok((StatusCode::OK, Json(brands)))
}

// POST /api/representatives/{id}/brands
#[utoipa::path(
    post,
    path = "/api/representatives/{id}/brands",
    tag = "Representatives",
    request_body = AddBrandPayload,
    params(("id" = Uuid, Path, description = "ID do representante")),
    responses(
        (status = 204, description = "Marca vinculada"),
        (status = 403, description = "Marca fora do alcance do chamador"),
        (status = 404, description = "Representante ou marca não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_represented_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddBrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .representative_service
        .add_brand(user.0.id, id, payload.brand_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/representatives/{id}/brands/{brand_id}
#[utoipa::path(
    delete,
    path = "/api/representatives/{id}/brands/{brand_id}",
    tag = "Representatives",
    params(
        ("id" = Uuid, Path, description = "ID do representante"),
        ("brand_id" = Uuid, Path, description = "ID da marca")
    ),
    responses(
        (status = 204, description = "Vínculo removido"),
        (status = 404, description = "Vínculo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_represented_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path((id, brand_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .representative_service
        .remove_brand(user.0.id, id, brand_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
