// src/db/representative_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{catalog::Brand, representative::Representative},
};

const REPRESENTATIVE_COLUMNS: &str =
    "id, owner_user_id, name, email, phone, created_at, updated_at";

#[derive(Clone)]
pub struct RepresentativeRepository {
    pool: PgPool,
}

impl RepresentativeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        owner_user_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Representative, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let representative = sqlx::query_as::<_, Representative>(&format!(
            r#"
            INSERT INTO representatives (owner_user_id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING {REPRESENTATIVE_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .fetch_one(executor)
        .await?;

        Ok(representative)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Representative>, AppError> {
        let maybe = sqlx::query_as::<_, Representative>(&format!(
            "SELECT {REPRESENTATIVE_COLUMNS} FROM representatives WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    /// Representantes visíveis: os do usuário, mais os que atendem alguma
    /// marca de um fabricante no escopo (dois saltos via tabela-ponte).
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        scope: &[Uuid],
        search: Option<&str>,
    ) -> Result<Vec<Representative>, AppError> {
        let representatives = sqlx::query_as::<_, Representative>(&format!(
            r#"
            SELECT {REPRESENTATIVE_COLUMNS}
            FROM representatives
            WHERE (
                owner_user_id = $1
                OR id IN (
                    SELECT rb.representative_id
                    FROM representative_brands rb
                    JOIN brands b ON b.id = rb.brand_id
                    WHERE b.manufacturer_id = ANY($2)
                )
            )
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')
            ORDER BY name ASC
            "#
        ))
        .bind(user_id)
        .bind(scope)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(representatives)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Representative>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Representative>(&format!(
            r#"
            UPDATE representatives
            SET name = COALESCE($2::text, name),
                email = COALESCE($3::text, email),
                phone = COALESCE($4::text, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REPRESENTATIVE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM representatives WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  MARCAS ATENDIDAS
    // =========================================================================

    pub async fn brands_of(&self, representative_id: Uuid) -> Result<Vec<Brand>, AppError> {
        let brands = sqlx::query_as::<_, Brand>(
            r#"
            SELECT b.id, b.owner_user_id, b.manufacturer_id, b.name, b.created_at, b.updated_at
            FROM representative_brands rb
            JOIN brands b ON b.id = rb.brand_id
            WHERE rb.representative_id = $1
            ORDER BY b.name ASC
            "#,
        )
        .bind(representative_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    /// Os fabricantes (possivelmente nulos) das marcas que o representante
    /// atende. Insumo do predicado de acesso de dois saltos.
    pub async fn represented_manufacturers(
        &self,
        representative_id: Uuid,
    ) -> Result<Vec<Option<Uuid>>, AppError> {
        let manufacturers = sqlx::query_scalar::<_, Option<Uuid>>(
            r#"
            SELECT b.manufacturer_id
            FROM representative_brands rb
            JOIN brands b ON b.id = rb.brand_id
            WHERE rb.representative_id = $1
            "#,
        )
        .bind(representative_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(manufacturers)
    }

    // Idempotente, como a delegação de fabricante.
    pub async fn add_brand<'e, E>(
        &self,
        executor: E,
        representative_id: Uuid,
        brand_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO representative_brands (representative_id, brand_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(representative_id)
        .bind(brand_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn remove_brand<'e, E>(
        &self,
        executor: E,
        representative_id: Uuid,
        brand_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM representative_brands WHERE representative_id = $1 AND brand_id = $2",
        )
        .bind(representative_id)
        .bind(brand_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
