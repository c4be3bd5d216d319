// src/services/inventory_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, InventoryRepository},
    models::inventory::InventoryItem,
    services::access_service::AccessService,
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    catalog_repo: CatalogRepository,
    access_service: AccessService,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        catalog_repo: CatalogRepository,
        access_service: AccessService,
        pool: PgPool,
    ) -> Self {
        Self {
            inventory_repo,
            catalog_repo,
            access_service,
            pool,
        }
    }

    // Registro de um bem comprado. O usuário final aponta para o catálogo
    // de um fabricante que não é dele; por isso aqui a exigência é só de
    // EXISTÊNCIA do produto/peça, não de acesso.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_item(
        &self,
        caller_id: Uuid,
        product_id: Option<Uuid>,
        part_id: Option<Uuid>,
        serial_number: Option<&str>,
        purchase_date: Option<NaiveDate>,
        purchase_price: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<InventoryItem, AppError> {
        if let Some(product_id) = product_id {
            self.catalog_repo
                .find_product_by_id(product_id)
                .await?
                .ok_or(AppError::NotFound("Produto"))?;
        }
        if let Some(part_id) = part_id {
            self.catalog_repo
                .find_part_by_id(part_id)
                .await?
                .ok_or(AppError::NotFound("Peça"))?;
        }

        self.inventory_repo
            .create_item(
                &self.pool,
                caller_id,
                product_id,
                part_id,
                serial_number,
                purchase_date,
                purchase_price,
                notes,
            )
            .await
    }

    pub async fn list_items(
        &self,
        caller_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<InventoryItem>, AppError> {
        let scope = self.access_service.tenant_scope(caller_id).await?;
        self.inventory_repo
            .list_visible(caller_id, &scope, search)
            .await
    }

    pub async fn get_item(&self, caller_id: Uuid, id: Uuid) -> Result<InventoryItem, AppError> {
        let item = self
            .inventory_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Item de inventário"))?;

        if !self
            .access_service
            .can_access_inventory_item(caller_id, &item)
            .await?
        {
            return Err(AppError::OwnershipForbidden("item de inventário"));
        }

        Ok(item)
    }

    pub async fn update_item(
        &self,
        caller_id: Uuid,
        id: Uuid,
        serial_number: Option<&str>,
        purchase_date: Option<NaiveDate>,
        purchase_price: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<InventoryItem, AppError> {
        let item = self.get_item(caller_id, id).await?;

        self.inventory_repo
            .update_item(
                &self.pool,
                item.id,
                serial_number,
                purchase_date,
                purchase_price,
                notes,
            )
            .await?
            .ok_or(AppError::NotFound("Item de inventário"))
    }

    pub async fn delete_item(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let item = self.get_item(caller_id, id).await?;

        let dependents = self.inventory_repo.count_item_dependents(item.id).await?;
        if dependents > 0 {
            return Err(AppError::ReferentialIntegrity(
                "O item ainda possui garantias vinculadas.".into(),
            ));
        }

        self.inventory_repo.delete_item(&self.pool, item.id).await?;
        Ok(())
    }
}
