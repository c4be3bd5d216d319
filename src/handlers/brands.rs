// src/handlers/brands.rs

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
    models::catalog::Brand,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandPayload {
    #[validate(length(min = 1, message = "O nome da marca é obrigatório."))]
    pub name: String,

    // Opcional: marca pode existir antes de ser amarrada a um fabricante.
    pub manufacturer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandPayload {
    #[validate(length(min = 1, message = "O nome da marca não pode ficar vazio."))]
    pub name: Option<String>,

    pub manufacturer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBrandsQuery {
    // Busca por nome; estreita o conjunto visível, nunca o alarga.
    pub q: Option<String>,
}

// POST /api/brands
#[utoipa::path(
    post,
    path = "/api/brands",
    tag = "Brands",
    request_body = CreateBrandPayload,
    responses(
        (status = 201, description = "Marca criada", body = Brand),
        (status = 403, description = "Fabricante fora do escopo do usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Json(payload): Json<CreateBrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let brand = app_state
        .catalog_service
        .create_brand(user.0.id, payload.manufacturer_id, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(brand)))
}

// GET /api/brands
#[utoipa::path(
    get,
    path = "/api/brands",
    tag = "Brands",
    params(ListBrandsQuery),
    responses(
        (status = 200, description = "Marcas visíveis para o usuário", body = Vec<Brand>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_brands(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Query(query): Query<ListBrandsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let brands = app_state
        .catalog_service
        .list_brands(user.0.id, query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(brands)))
}

// GET /api/brands/{id}
#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "ID da marca")),
    responses(
        (status = 200, description = "Marca", body = Brand),
        (status = 403, description = "Sem autorização sobre a marca"),
        (status = 404, description = "Marca não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let brand = app_state.catalog_service.get_brand(user.0.id, id).await?;
    Ok((StatusCode::OK, Json(brand)))
}

// PUT /api/brands/{id}
#[utoipa::path(
    put,
    path = "/api/brands/{id}",
    tag = "Brands",
    request_body = UpdateBrandPayload,
    params(("id" = Uuid, Path, description = "ID da marca")),
    responses(
        (status = 200, description = "Marca atualizada", body = Brand),
        (status = 403, description = "Sem autorização sobre a marca"),
        (status = 404, description = "Marca não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let brand = app_state
        .catalog_service
        .update_brand(
            user.0.id,
            id,
            payload.name.as_deref(),
            payload.manufacturer_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(brand)))
}

// DELETE /api/brands/{id}
#[utoipa::path(
    delete,
    path = "/api/brands/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "ID da marca")),
    responses(
        (status = 204, description = "Marca excluída"),
        (status = 403, description = "Sem autorização sobre a marca"),
        (status = 409, description = "Marca ainda possui produtos")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_brand(user.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
