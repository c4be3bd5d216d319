// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Bem registrado por um usuário final (a geladeira que ele comprou).
// Aponta para um produto OU para uma peça do catálogo, nunca os dois;
// o CHECK `inventory_items_single_link` garante isso no banco.
// O alcance pelo fabricante é transitivo: item -> produto/peça -> fabricante.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub product_id: Option<Uuid>,
    pub part_id: Option<Uuid>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
