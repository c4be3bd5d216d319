// src/models/manufacturer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "manufacturer_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ManufacturerStatus {
    Active,
    Suspended,
}

// O fabricante é o tenant: a unidade de isolamento do sistema inteiro.
// O apoderado (legal_representative_id) é dono; os delegados recebem o
// mesmo acesso operacional pela tabela-ponte manufacturer_delegates.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: Uuid,
    pub legal_representative_id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    pub status: ManufacturerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da tabela-ponte de delegados.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerDelegate {
    pub manufacturer_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
