// src/services/warranty_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, ManufacturerRepository, WarrantyRepository},
    models::warranty::{Warranty, WarrantyStatus},
    services::access_service::AccessService,
};

#[derive(Clone)]
pub struct WarrantyService {
    warranty_repo: WarrantyRepository,
    inventory_repo: InventoryRepository,
    manufacturer_repo: ManufacturerRepository,
    access_service: AccessService,
    pool: PgPool,
}

impl WarrantyService {
    pub fn new(
        warranty_repo: WarrantyRepository,
        inventory_repo: InventoryRepository,
        manufacturer_repo: ManufacturerRepository,
        access_service: AccessService,
        pool: PgPool,
    ) -> Self {
        Self {
            warranty_repo,
            inventory_repo,
            manufacturer_repo,
            access_service,
            pool,
        }
    }

    // Abertura de solicitação. O fabricante apontado NÃO precisa estar no
    // escopo do chamador: a solicitação é endereçada A ele, e é o escopo
    // que depois a torna visível para o apoderado e os delegados. Já o
    // item, se vier, precisa estar ao alcance de quem abre.
    pub async fn create(
        &self,
        caller_id: Uuid,
        manufacturer_id: Option<Uuid>,
        inventory_item_id: Option<Uuid>,
        description: &str,
    ) -> Result<Warranty, AppError> {
        if let Some(manufacturer_id) = manufacturer_id {
            if !self.manufacturer_repo.exists(manufacturer_id).await? {
                return Err(AppError::NotFound("Fabricante"));
            }
        }

        if let Some(item_id) = inventory_item_id {
            let item = self
                .inventory_repo
                .find_by_id(item_id)
                .await?
                .ok_or(AppError::NotFound("Item de inventário"))?;

            if !self
                .access_service
                .can_access_inventory_item(caller_id, &item)
                .await?
            {
                return Err(AppError::OwnershipForbidden("item de inventário"));
            }
        }

        self.warranty_repo
            .create(
                &self.pool,
                caller_id,
                manufacturer_id,
                inventory_item_id,
                description,
            )
            .await
    }

    pub async fn list(
        &self,
        caller_id: Uuid,
        status: Option<WarrantyStatus>,
    ) -> Result<Vec<Warranty>, AppError> {
        let scope = self.access_service.tenant_scope(caller_id).await?;
        self.warranty_repo
            .list_visible(caller_id, &scope, status)
            .await
    }

    pub async fn get(&self, caller_id: Uuid, id: Uuid) -> Result<Warranty, AppError> {
        let warranty = self
            .warranty_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Garantia"))?;

        if !self
            .access_service
            .can_access_warranty(caller_id, &warranty)
            .await?
        {
            return Err(AppError::OwnershipForbidden("garantia"));
        }

        Ok(warranty)
    }

    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        description: Option<&str>,
        manufacturer_id: Option<Uuid>,
    ) -> Result<Warranty, AppError> {
        let warranty = self.get(caller_id, id).await?;

        if let Some(manufacturer_id) = manufacturer_id {
            if !self.manufacturer_repo.exists(manufacturer_id).await? {
                return Err(AppError::NotFound("Fabricante"));
            }
        }

        self.warranty_repo
            .update(&self.pool, warranty.id, description, manufacturer_id)
            .await?
            .ok_or(AppError::NotFound("Garantia"))
    }

    pub async fn set_status(
        &self,
        caller_id: Uuid,
        id: Uuid,
        status: WarrantyStatus,
    ) -> Result<Warranty, AppError> {
        let warranty = self.get(caller_id, id).await?;

        self.warranty_repo
            .set_status(&self.pool, warranty.id, status)
            .await?
            .ok_or(AppError::NotFound("Garantia"))
    }

    pub async fn delete(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let warranty = self.get(caller_id, id).await?;
        self.warranty_repo.delete(&self.pool, warranty.id).await?;
        Ok(())
    }
}
