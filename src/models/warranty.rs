// src/models/warranty.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "warranty_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WarrantyStatus {
    Requested,
    InReview,
    Approved,
    Rejected,
}

// Solicitação de garantia. Quem abre é o dono; o fabricante apontado
// (e seus delegados) enxerga e trata a solicitação via escopo de tenant.
// O fabricante é opcional: solicitações recém-abertas podem ainda não
// ter um responsável.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warranty {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub manufacturer_id: Option<Uuid>,
    pub inventory_item_id: Option<Uuid>,
    pub description: String,
    pub status: WarrantyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
