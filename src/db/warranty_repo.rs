// src/db/warranty_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::warranty::{Warranty, WarrantyStatus},
};

const WARRANTY_COLUMNS: &str = "id, owner_user_id, manufacturer_id, inventory_item_id, \
                                description, status, created_at, updated_at";

#[derive(Clone)]
pub struct WarrantyRepository {
    pool: PgPool,
}

impl WarrantyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_user_id: Uuid,
        manufacturer_id: Option<Uuid>,
        inventory_item_id: Option<Uuid>,
        description: &str,
    ) -> Result<Warranty, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let warranty = sqlx::query_as::<_, Warranty>(&format!(
            r#"
            INSERT INTO warranties (owner_user_id, manufacturer_id, inventory_item_id, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {WARRANTY_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(manufacturer_id)
        .bind(inventory_item_id)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(warranty)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Warranty>, AppError> {
        let maybe = sqlx::query_as::<_, Warranty>(&format!(
            "SELECT {WARRANTY_COLUMNS} FROM warranties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    /// Solicitações visíveis: as abertas pelo usuário, mais as endereçadas
    /// a um fabricante do escopo dele. O filtro de status entra por AND.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        scope: &[Uuid],
        status: Option<WarrantyStatus>,
    ) -> Result<Vec<Warranty>, AppError> {
        let warranties = sqlx::query_as::<_, Warranty>(&format!(
            r#"
            SELECT {WARRANTY_COLUMNS}
            FROM warranties
            WHERE (owner_user_id = $1 OR manufacturer_id = ANY($2))
              AND ($3::warranty_status IS NULL OR status = $3)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(scope)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(warranties)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        description: Option<&str>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<Option<Warranty>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Warranty>(&format!(
            r#"
            UPDATE warranties
            SET description = COALESCE($2::text, description),
                manufacturer_id = COALESCE($3::uuid, manufacturer_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {WARRANTY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(description)
        .bind(manufacturer_id)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: WarrantyStatus,
    ) -> Result<Option<Warranty>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Warranty>(&format!(
            r#"
            UPDATE warranties
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {WARRANTY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM warranties WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
