// src/db/inventory_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::InventoryItem};

const ITEM_COLUMNS: &str = "id, owner_user_id, product_id, part_id, serial_number, \
                            purchase_date, purchase_price, notes, created_at, updated_at";

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_item<'e, E>(
        &self,
        executor: E,
        owner_user_id: Uuid,
        product_id: Option<Uuid>,
        part_id: Option<Uuid>,
        serial_number: Option<&str>,
        purchase_date: Option<NaiveDate>,
        purchase_price: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            INSERT INTO inventory_items
                (owner_user_id, product_id, part_id, serial_number,
                 purchase_date, purchase_price, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(product_id)
        .bind(part_id)
        .bind(serial_number)
        .bind(purchase_date)
        .bind(purchase_price)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError> {
        let maybe = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    /// Itens visíveis: os do próprio usuário, mais os que apontam (via
    /// produto ou peça) para um fabricante dentro do escopo. A resolução
    /// de dois saltos fica nos subselects, com o MESMO filtro de escopo
    /// usado nas checagens pontuais.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        scope: &[Uuid],
        search: Option<&str>,
    ) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM inventory_items
            WHERE (
                owner_user_id = $1
                OR product_id IN (SELECT id FROM products WHERE manufacturer_id = ANY($2))
                OR part_id IN (SELECT id FROM parts WHERE manufacturer_id = ANY($2))
            )
              AND ($3::text IS NULL OR serial_number ILIKE '%' || $3 || '%')
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(scope)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        serial_number: Option<&str>,
        purchase_date: Option<NaiveDate>,
        purchase_price: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            UPDATE inventory_items
            SET serial_number = COALESCE($2::text, serial_number),
                purchase_date = COALESCE($3::date, purchase_date),
                purchase_price = COALESCE($4::numeric, purchase_price),
                notes = COALESCE($5::text, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(serial_number)
        .bind(purchase_date)
        .bind(purchase_price)
        .bind(notes)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn count_item_dependents(&self, id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM warranties WHERE inventory_item_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
