// src/db/manufacturer_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::manufacturer::{Manufacturer, ManufacturerDelegate, ManufacturerStatus},
};

const MANUFACTURER_COLUMNS: &str =
    "id, legal_representative_id, name, tax_id, status, created_at, updated_at";

#[derive(Clone)]
pub struct ManufacturerRepository {
    pool: PgPool,
}

impl ManufacturerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// O escopo de tenant do usuário: todos os fabricantes em que ele é
    /// apoderado OU delegado. Esta consulta é a fonte única de verdade
    /// para "em nome de quais fabricantes este usuário pode agir", tanto
    /// para filtros de listagem quanto para checagens pontuais.
    /// Sem cache: cada chamada reflete o estado vivo das delegações.
    pub async fn tenant_scope(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let scope = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM manufacturers WHERE legal_representative_id = $1
            UNION
            SELECT manufacturer_id FROM manufacturer_delegates WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scope)
    }

    /// Variante estreita do escopo: só fabricantes com o status pedido
    /// (ex.: listar apenas fabricantes ativos ao vincular um produto).
    pub async fn tenant_scope_with_status(
        &self,
        user_id: Uuid,
        status: ManufacturerStatus,
    ) -> Result<Vec<Uuid>, AppError> {
        let scope = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT m.id
            FROM manufacturers m
            LEFT JOIN manufacturer_delegates d
                ON d.manufacturer_id = m.id AND d.user_id = $1
            WHERE (m.legal_representative_id = $1 OR d.user_id IS NOT NULL)
              AND m.status = $2
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(scope)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Manufacturer>, AppError> {
        let maybe = sqlx::query_as::<_, Manufacturer>(&format!(
            "SELECT {MANUFACTURER_COLUMNS} FROM manufacturers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM manufacturers WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // Materializa o escopo em registros completos, para a listagem.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Manufacturer>, AppError> {
        let manufacturers = sqlx::query_as::<_, Manufacturer>(&format!(
            "SELECT {MANUFACTURER_COLUMNS} FROM manufacturers WHERE id = ANY($1) ORDER BY name ASC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(manufacturers)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        legal_representative_id: Uuid,
        name: &str,
        tax_id: Option<&str>,
    ) -> Result<Manufacturer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(&format!(
            r#"
            INSERT INTO manufacturers (legal_representative_id, name, tax_id)
            VALUES ($1, $2, $3)
            RETURNING {MANUFACTURER_COLUMNS}
            "#
        ))
        .bind(legal_representative_id)
        .bind(name)
        .bind(tax_id)
        .fetch_one(executor)
        .await?;

        Ok(manufacturer)
    }

    // Atualização parcial de dados cadastrais. A troca de apoderado tem
    // método próprio porque a regra de quem pode fazê-la é outra.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        tax_id: Option<&str>,
        status: Option<ManufacturerStatus>,
    ) -> Result<Option<Manufacturer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Manufacturer>(&format!(
            r#"
            UPDATE manufacturers
            SET name = COALESCE($2::text, name),
                tax_id = COALESCE($3::text, tax_id),
                status = COALESCE($4::manufacturer_status, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MANUFACTURER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(tax_id)
        .bind(status)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn update_legal_representative<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        new_legal_representative_id: Uuid,
    ) -> Result<Option<Manufacturer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Manufacturer>(&format!(
            r#"
            UPDATE manufacturers
            SET legal_representative_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {MANUFACTURER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(new_legal_representative_id)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    // Conta tudo que ainda aponta para o fabricante. Exclusão só é
    // permitida com zero dependentes.
    pub async fn count_dependents(&self, id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT (SELECT COUNT(*) FROM brands WHERE manufacturer_id = $1)
                 + (SELECT COUNT(*) FROM products WHERE manufacturer_id = $1)
                 + (SELECT COUNT(*) FROM parts WHERE manufacturer_id = $1)
                 + (SELECT COUNT(*) FROM warranties WHERE manufacturer_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  DELEGADOS
    // =========================================================================

    pub async fn list_delegates(
        &self,
        manufacturer_id: Uuid,
    ) -> Result<Vec<ManufacturerDelegate>, AppError> {
        let delegates = sqlx::query_as::<_, ManufacturerDelegate>(
            r#"
            SELECT manufacturer_id, user_id, created_at
            FROM manufacturer_delegates
            WHERE manufacturer_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(manufacturer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(delegates)
    }

    // Idempotente: delegar duas vezes não é erro.
    pub async fn add_delegate<'e, E>(
        &self,
        executor: E,
        manufacturer_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO manufacturer_delegates (manufacturer_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(manufacturer_id)
        .bind(user_id)
        .execute(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // FK de usuário inexistente vira um 404 amigável.
                if db_err.is_foreign_key_violation() {
                    return AppError::UserNotFound;
                }
            }
            e.into()
        })?;

        Ok(())
    }

    pub async fn remove_delegate<'e, E>(
        &self,
        executor: E,
        manufacturer_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM manufacturer_delegates WHERE manufacturer_id = $1 AND user_id = $2",
        )
        .bind(manufacturer_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
