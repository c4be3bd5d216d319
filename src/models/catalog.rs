// src/models/catalog.rs
//
// O catálogo do lado do fabricante: marcas, produtos e peças.
// Todos carregam `owner_user_id` (quem criou) e um `manufacturer_id`
// opcional que liga o recurso ao escopo do tenant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub manufacturer_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub manufacturer_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub name: String,
    pub model_code: Option<String>,
    pub warranty_months: i32,
    pub price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Peça de reposição. Pode estar amarrada a um produto do catálogo.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub manufacturer_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub name: String,
    pub part_code: Option<String>,
    pub price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
