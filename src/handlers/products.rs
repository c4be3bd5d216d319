// src/handlers/products.rs

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
    models::catalog::Product,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,

    pub manufacturer_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub model_code: Option<String>,

    #[validate(range(min = 0, message = "A garantia não pode ser negativa."))]
    #[serde(default = "default_warranty_months")]
    pub warranty_months: i32,

    pub price: Option<Decimal>,
}

fn default_warranty_months() -> i32 {
    12
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome do produto não pode ficar vazio."))]
    pub name: Option<String>,

    pub model_code: Option<String>,
    pub brand_id: Option<Uuid>,

    #[validate(range(min = 0, message = "A garantia não pode ser negativa."))]
    pub warranty_months: Option<i32>,

    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub q: Option<String>,
    // Estreita a listagem a um fabricante específico (sempre por AND
    // com o filtro de acesso).
    pub manufacturer_id: Option<Uuid>,
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 403, description = "Fabricante ou marca fora do alcance")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .create_product(
            user.0.id,
            payload.manufacturer_id,
            payload.brand_id,
            &payload.name,
            payload.model_code.as_deref(),
            payload.warranty_months,
            payload.price,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Produtos visíveis para o usuário", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .catalog_service
        .list_products(user.0.id, query.q.as_deref(), query.manufacturer_id)
        .await?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 403, description = "Sem autorização sobre o produto"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(user.0.id, id).await?;
    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    request_body = UpdateProductPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 403, description = "Sem autorização sobre o produto"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .update_product(
            user.0.id,
            id,
            payload.name.as_deref(),
            payload.model_code.as_deref(),
            payload.brand_id,
            payload.warranty_months,
            payload.price,
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 403, description = "Sem autorização sobre o produto"),
        (status = 409, description = "Produto ainda possui dependentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireAnyRole<ManufacturerStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .delete_product(user.0.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
