// src/models/representative.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Representante comercial/técnico. NÃO confundir com o representante
// legal (apoderado) do fabricante: este aqui é uma entidade de negócio
// ligada a marcas. O alcance pelo fabricante é transitivo:
// representante -> marcas atendidas -> fabricante.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
