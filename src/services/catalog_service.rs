// src/services/catalog_service.rs
//
// CRUD do catálogo com as checagens de autorização na frente de cada
// mutação: carregar a instância, perguntar ao predicado, só então agir.
// Um `false` do predicado vira 403: o recurso existe, o chamador é que
// não alcança.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Brand, Part, Product},
    services::access_service::AccessService,
};

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
    access_service: AccessService,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository, access_service: AccessService, pool: PgPool) -> Self {
        Self {
            catalog_repo,
            access_service,
            pool,
        }
    }

    // Vincular um recurso novo a um fabricante exige que o fabricante
    // esteja no escopo de quem cria; ninguém pendura catálogo em tenant
    // alheio.
    async fn ensure_manufacturer_in_scope(
        &self,
        caller_id: Uuid,
        manufacturer_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(manufacturer_id) = manufacturer_id {
            let scope = self.access_service.tenant_scope(caller_id).await?;
            if !scope.contains(&manufacturer_id) {
                return Err(AppError::OwnershipForbidden("fabricante"));
            }
        }
        Ok(())
    }

    // =========================================================================
    //  MARCAS
    // =========================================================================

    pub async fn create_brand(
        &self,
        caller_id: Uuid,
        manufacturer_id: Option<Uuid>,
        name: &str,
    ) -> Result<Brand, AppError> {
        self.ensure_manufacturer_in_scope(caller_id, manufacturer_id)
            .await?;

        self.catalog_repo
            .create_brand(&self.pool, caller_id, manufacturer_id, name)
            .await
    }

    pub async fn list_brands(
        &self,
        caller_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Brand>, AppError> {
        let scope = self.access_service.tenant_scope(caller_id).await?;
        self.catalog_repo
            .list_visible_brands(caller_id, &scope, search)
            .await
    }

    pub async fn get_brand(&self, caller_id: Uuid, id: Uuid) -> Result<Brand, AppError> {
        let brand = self
            .catalog_repo
            .find_brand_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Marca"))?;

        if !self.access_service.can_access_brand(caller_id, &brand).await? {
            return Err(AppError::OwnershipForbidden("marca"));
        }

        Ok(brand)
    }

    pub async fn update_brand(
        &self,
        caller_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<Brand, AppError> {
        let brand = self.get_brand(caller_id, id).await?;

        // Reatribuição de fabricante segue a mesma regra da criação.
        self.ensure_manufacturer_in_scope(caller_id, manufacturer_id)
            .await?;

        self.catalog_repo
            .update_brand(&self.pool, brand.id, name, manufacturer_id)
            .await?
            .ok_or(AppError::NotFound("Marca"))
    }

    pub async fn delete_brand(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let brand = self.get_brand(caller_id, id).await?;

        let dependents = self.catalog_repo.count_brand_dependents(brand.id).await?;
        if dependents > 0 {
            return Err(AppError::ReferentialIntegrity(
                "A marca ainda possui produtos vinculados.".into(),
            ));
        }

        self.catalog_repo.delete_brand(&self.pool, brand.id).await?;
        Ok(())
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        caller_id: Uuid,
        manufacturer_id: Option<Uuid>,
        brand_id: Option<Uuid>,
        name: &str,
        model_code: Option<&str>,
        warranty_months: i32,
        price: Option<Decimal>,
    ) -> Result<Product, AppError> {
        self.ensure_manufacturer_in_scope(caller_id, manufacturer_id)
            .await?;

        // A marca apontada precisa existir e estar ao alcance do chamador.
        if let Some(brand_id) = brand_id {
            self.get_brand(caller_id, brand_id).await?;
        }

        self.catalog_repo
            .create_product(
                &self.pool,
                caller_id,
                manufacturer_id,
                brand_id,
                name,
                model_code,
                warranty_months,
                price,
            )
            .await
    }

    pub async fn list_products(
        &self,
        caller_id: Uuid,
        search: Option<&str>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<Vec<Product>, AppError> {
        let scope = self.access_service.tenant_scope(caller_id).await?;
        self.catalog_repo
            .list_visible_products(caller_id, &scope, search, manufacturer_id)
            .await
    }

    pub async fn get_product(&self, caller_id: Uuid, id: Uuid) -> Result<Product, AppError> {
        let product = self
            .catalog_repo
            .find_product_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Produto"))?;

        if !self
            .access_service
            .can_access_product(caller_id, &product)
            .await?
        {
            return Err(AppError::OwnershipForbidden("produto"));
        }

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        caller_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        model_code: Option<&str>,
        brand_id: Option<Uuid>,
        warranty_months: Option<i32>,
        price: Option<Decimal>,
    ) -> Result<Product, AppError> {
        let product = self.get_product(caller_id, id).await?;

        if let Some(brand_id) = brand_id {
            self.get_brand(caller_id, brand_id).await?;
        }

        self.catalog_repo
            .update_product(
                &self.pool,
                product.id,
                name,
                model_code,
                brand_id,
                warranty_months,
                price,
            )
            .await?
            .ok_or(AppError::NotFound("Produto"))
    }

    pub async fn delete_product(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let product = self.get_product(caller_id, id).await?;

        let dependents = self
            .catalog_repo
            .count_product_dependents(product.id)
            .await?;
        if dependents > 0 {
            return Err(AppError::ReferentialIntegrity(
                "O produto ainda possui peças ou itens de inventário vinculados.".into(),
            ));
        }

        self.catalog_repo
            .delete_product(&self.pool, product.id)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  PEÇAS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_part(
        &self,
        caller_id: Uuid,
        manufacturer_id: Option<Uuid>,
        product_id: Option<Uuid>,
        name: &str,
        part_code: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Part, AppError> {
        self.ensure_manufacturer_in_scope(caller_id, manufacturer_id)
            .await?;

        if let Some(product_id) = product_id {
            self.get_product(caller_id, product_id).await?;
        }

        self.catalog_repo
            .create_part(
                &self.pool,
                caller_id,
                manufacturer_id,
                product_id,
                name,
                part_code,
                price,
            )
            .await
    }

    pub async fn list_parts(
        &self,
        caller_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Part>, AppError> {
        let scope = self.access_service.tenant_scope(caller_id).await?;
        self.catalog_repo
            .list_visible_parts(caller_id, &scope, search)
            .await
    }

    pub async fn get_part(&self, caller_id: Uuid, id: Uuid) -> Result<Part, AppError> {
        let part = self
            .catalog_repo
            .find_part_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Peça"))?;

        if !self.access_service.can_access_part(caller_id, &part).await? {
            return Err(AppError::OwnershipForbidden("peça"));
        }

        Ok(part)
    }

    pub async fn update_part(
        &self,
        caller_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        part_code: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Part, AppError> {
        let part = self.get_part(caller_id, id).await?;

        self.catalog_repo
            .update_part(&self.pool, part.id, name, part_code, price)
            .await?
            .ok_or(AppError::NotFound("Peça"))
    }

    pub async fn delete_part(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let part = self.get_part(caller_id, id).await?;

        let dependents = self.catalog_repo.count_part_dependents(part.id).await?;
        if dependents > 0 {
            return Err(AppError::ReferentialIntegrity(
                "A peça ainda possui itens de inventário vinculados.".into(),
            ));
        }

        self.catalog_repo.delete_part(&self.pool, part.id).await?;
        Ok(())
    }
}
