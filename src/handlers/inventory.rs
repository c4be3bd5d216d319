// src/handlers/inventory.rs
//
// Registro de bens do usuário final. Qualquer papel autenticado chega
// aqui: o usuário comum registra o que comprou, e a equipe do fabricante
// enxerga (via escopo) os itens ligados ao seu catálogo.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::inventory::InventoryItem,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    pub product_id: Option<Uuid>,
    pub part_id: Option<Uuid>,

    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
}

// Validação de consistência: o item aponta para um produto OU para uma
// peça, exatamente um dos dois.
impl CreateItemPayload {
    fn validate_link(&self) -> Result<(), ValidationError> {
        match (self.product_id, self.part_id) {
            (Some(_), Some(_)) => Err(ValidationError::new("ProductAndPart")),
            (None, None) => Err(ValidationError::new("ProductOrPartRequired")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListItemsQuery {
    // Busca por número de série.
    pub q: Option<String>,
}

// POST /api/inventory/items
#[utoipa::path(
    post,
    path = "/api/inventory/items",
    tag = "Inventory",
    request_body = CreateItemPayload,
    responses(
        (status = 201, description = "Item registrado", body = InventoryItem),
        (status = 400, description = "Item precisa apontar para um produto OU uma peça"),
        (status = 404, description = "Produto ou peça não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Mantém o padrão de resposta de validação para a regra manual.
    payload.validate_link().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("productId", e);
        AppError::ValidationError(errors)
    })?;

    let item = app_state
        .inventory_service
        .create_item(
            user.0.id,
            payload.product_id,
            payload.part_id,
            payload.serial_number.as_deref(),
            payload.purchase_date,
            payload.purchase_price,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/inventory/items
#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Inventory",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Itens visíveis para o usuário", body = Vec<InventoryItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListItemsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state
        .inventory_service
        .list_items(user.0.id, query.q.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/inventory/items/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item de inventário", body = InventoryItem),
        (status = 403, description = "Sem autorização sobre o item"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.inventory_service.get_item(user.0.id, id).await?;
    Ok((StatusCode::OK, Json(item)))
}

// PUT /api/inventory/items/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    request_body = UpdateItemPayload,
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 200, description = "Item atualizado", body = InventoryItem),
        (status = 403, description = "Sem autorização sobre o item"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state
        .inventory_service
        .update_item(
            user.0.id,
            id,
            payload.serial_number.as_deref(),
            payload.purchase_date,
            payload.purchase_price,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/inventory/items/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do item")),
    responses(
        (status = 204, description = "Item excluído"),
        (status = 403, description = "Sem autorização sobre o item"),
        (status = 409, description = "Item ainda possui garantias")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .inventory_service
        .delete_item(user.0.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(product: Option<Uuid>, part: Option<Uuid>) -> CreateItemPayload {
        CreateItemPayload {
            product_id: product,
            part_id: part,
            serial_number: None,
            purchase_date: None,
            purchase_price: None,
            notes: None,
        }
    }

    #[test]
    fn item_must_link_exactly_one_of_product_or_part() {
        assert!(payload(Some(Uuid::new_v4()), None).validate_link().is_ok());
        assert!(payload(None, Some(Uuid::new_v4())).validate_link().is_ok());
        assert!(payload(None, None).validate_link().is_err());
        assert!(
            payload(Some(Uuid::new_v4()), Some(Uuid::new_v4()))
                .validate_link()
                .is_err()
        );
    }
}
