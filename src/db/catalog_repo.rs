// src/db/catalog_repo.rs
//
// Repositório do catálogo (marcas, produtos e peças). As listagens
// aplicam o filtro de acesso no próprio banco: dono direto OU fabricante
// dentro do escopo do usuário. Filtros de busca entram sempre por AND:
// podem estreitar o conjunto visível, nunca alargá-lo.

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Brand, Part, Product},
};

const BRAND_COLUMNS: &str = "id, owner_user_id, manufacturer_id, name, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, owner_user_id, manufacturer_id, brand_id, name, model_code, \
                               warranty_months, price, created_at, updated_at";
const PART_COLUMNS: &str = "id, owner_user_id, manufacturer_id, product_id, name, part_code, \
                            price, created_at, updated_at";

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  MARCAS
    // =========================================================================

    pub async fn create_brand<'e, E>(
        &self,
        executor: E,
        owner_user_id: Uuid,
        manufacturer_id: Option<Uuid>,
        name: &str,
    ) -> Result<Brand, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let brand = sqlx::query_as::<_, Brand>(&format!(
            r#"
            INSERT INTO brands (owner_user_id, manufacturer_id, name)
            VALUES ($1, $2, $3)
            RETURNING {BRAND_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(manufacturer_id)
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(brand)
    }

    pub async fn find_brand_by_id(&self, id: Uuid) -> Result<Option<Brand>, AppError> {
        let maybe = sqlx::query_as::<_, Brand>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    /// Marcas visíveis para o usuário: as dele, mais as dos fabricantes
    /// no escopo. Mesmo critério do predicado pontual de acesso.
    pub async fn list_visible_brands(
        &self,
        user_id: Uuid,
        scope: &[Uuid],
        search: Option<&str>,
    ) -> Result<Vec<Brand>, AppError> {
        let brands = sqlx::query_as::<_, Brand>(&format!(
            r#"
            SELECT {BRAND_COLUMNS}
            FROM brands
            WHERE (owner_user_id = $1 OR manufacturer_id = ANY($2))
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')
            ORDER BY name ASC
            "#
        ))
        .bind(user_id)
        .bind(scope)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    pub async fn update_brand<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<Option<Brand>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Brand>(&format!(
            r#"
            UPDATE brands
            SET name = COALESCE($2::text, name),
                manufacturer_id = COALESCE($3::uuid, manufacturer_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BRAND_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(manufacturer_id)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn count_brand_dependents(&self, id: Uuid) -> Result<i64, AppError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE brand_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }

    pub async fn delete_brand<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        owner_user_id: Uuid,
        manufacturer_id: Option<Uuid>,
        brand_id: Option<Uuid>,
        name: &str,
        model_code: Option<&str>,
        warranty_months: i32,
        price: Option<Decimal>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products
                (owner_user_id, manufacturer_id, brand_id, name, model_code, warranty_months, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(manufacturer_id)
        .bind(brand_id)
        .bind(name)
        .bind(model_code)
        .bind(warranty_months)
        .bind(price)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    pub async fn find_product_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let maybe = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn list_visible_products(
        &self,
        user_id: Uuid,
        scope: &[Uuid],
        search: Option<&str>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE (owner_user_id = $1 OR manufacturer_id = ANY($2))
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%'
                   OR model_code ILIKE '%' || $3 || '%')
              AND ($4::uuid IS NULL OR manufacturer_id = $4)
            ORDER BY name ASC
            "#
        ))
        .bind(user_id)
        .bind(scope)
        .bind(search)
        .bind(manufacturer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        model_code: Option<&str>,
        brand_id: Option<Uuid>,
        warranty_months: Option<i32>,
        price: Option<Decimal>,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2::text, name),
                model_code = COALESCE($3::text, model_code),
                brand_id = COALESCE($4::uuid, brand_id),
                warranty_months = COALESCE($5::int, warranty_months),
                price = COALESCE($6::numeric, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(model_code)
        .bind(brand_id)
        .bind(warranty_months)
        .bind(price)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn count_product_dependents(&self, id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT (SELECT COUNT(*) FROM parts WHERE product_id = $1)
                 + (SELECT COUNT(*) FROM inventory_items WHERE product_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn delete_product<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  PEÇAS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_part<'e, E>(
        &self,
        executor: E,
        owner_user_id: Uuid,
        manufacturer_id: Option<Uuid>,
        product_id: Option<Uuid>,
        name: &str,
        part_code: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Part, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let part = sqlx::query_as::<_, Part>(&format!(
            r#"
            INSERT INTO parts (owner_user_id, manufacturer_id, product_id, name, part_code, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(owner_user_id)
        .bind(manufacturer_id)
        .bind(product_id)
        .bind(name)
        .bind(part_code)
        .bind(price)
        .fetch_one(executor)
        .await?;

        Ok(part)
    }

    pub async fn find_part_by_id(&self, id: Uuid) -> Result<Option<Part>, AppError> {
        let maybe = sqlx::query_as::<_, Part>(&format!(
            "SELECT {PART_COLUMNS} FROM parts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe)
    }

    pub async fn list_visible_parts(
        &self,
        user_id: Uuid,
        scope: &[Uuid],
        search: Option<&str>,
    ) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>(&format!(
            r#"
            SELECT {PART_COLUMNS}
            FROM parts
            WHERE (owner_user_id = $1 OR manufacturer_id = ANY($2))
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%'
                   OR part_code ILIKE '%' || $3 || '%')
            ORDER BY name ASC
            "#
        ))
        .bind(user_id)
        .bind(scope)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    pub async fn update_part<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        part_code: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Option<Part>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Part>(&format!(
            r#"
            UPDATE parts
            SET name = COALESCE($2::text, name),
                part_code = COALESCE($3::text, part_code),
                price = COALESCE($4::numeric, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(part_code)
        .bind(price)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    pub async fn count_part_dependents(&self, id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory_items WHERE part_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn delete_part<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
