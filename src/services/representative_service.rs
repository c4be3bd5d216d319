// src/services/representative_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, RepresentativeRepository},
    models::{catalog::Brand, representative::Representative},
    services::access_service::AccessService,
};

#[derive(Clone)]
pub struct RepresentativeService {
    representative_repo: RepresentativeRepository,
    catalog_repo: CatalogRepository,
    access_service: AccessService,
    pool: PgPool,
}

impl RepresentativeService {
    pub fn new(
        representative_repo: RepresentativeRepository,
        catalog_repo: CatalogRepository,
        access_service: AccessService,
        pool: PgPool,
    ) -> Self {
        Self {
            representative_repo,
            catalog_repo,
            access_service,
            pool,
        }
    }

    pub async fn create(
        &self,
        caller_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Representative, AppError> {
        self.representative_repo
            .create(&self.pool, caller_id, name, email, phone)
            .await
    }

    pub async fn list(
        &self,
        caller_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Representative>, AppError> {
        let scope = self.access_service.tenant_scope(caller_id).await?;
        self.representative_repo
            .list_visible(caller_id, &scope, search)
            .await
    }

    pub async fn get(&self, caller_id: Uuid, id: Uuid) -> Result<Representative, AppError> {
        let representative = self
            .representative_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Representante"))?;

        if !self
            .access_service
            .can_access_representative(caller_id, &representative)
            .await?
        {
            return Err(AppError::OwnershipForbidden("representante"));
        }

        Ok(representative)
    }

    pub async fn update(
        &self,
        caller_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Representative, AppError> {
        let representative = self.get(caller_id, id).await?;

        self.representative_repo
            .update(&self.pool, representative.id, name, email, phone)
            .await?
            .ok_or(AppError::NotFound("Representante"))
    }

    // Os vínculos com marcas são linhas-ponte e somem junto; não há
    // dependente que bloqueie a exclusão.
    pub async fn delete(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let representative = self.get(caller_id, id).await?;
        self.representative_repo
            .delete(&self.pool, representative.id)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  MARCAS ATENDIDAS
    // =========================================================================

    pub async fn list_brands(
        &self,
        caller_id: Uuid,
        representative_id: Uuid,
    ) -> Result<Vec<Brand>, AppError> {
        let representative = self.get(caller_id, representative_id).await?;
        self.representative_repo.brands_of(representative.id).await
    }

    // Vincular uma marca dá ao representante alcance sobre o tenant dela;
    // por isso a marca também precisa estar ao alcance do chamador.
    pub async fn add_brand(
        &self,
        caller_id: Uuid,
        representative_id: Uuid,
        brand_id: Uuid,
    ) -> Result<(), AppError> {
        let representative = self.get(caller_id, representative_id).await?;

        let brand = self
            .catalog_repo
            .find_brand_by_id(brand_id)
            .await?
            .ok_or(AppError::NotFound("Marca"))?;

        if !self.access_service.can_access_brand(caller_id, &brand).await? {
            return Err(AppError::OwnershipForbidden("marca"));
        }

        self.representative_repo
            .add_brand(&self.pool, representative.id, brand.id)
            .await
    }

    pub async fn remove_brand(
        &self,
        caller_id: Uuid,
        representative_id: Uuid,
        brand_id: Uuid,
    ) -> Result<(), AppError> {
        let representative = self.get(caller_id, representative_id).await?;

        let removed = self
            .representative_repo
            .remove_brand(&self.pool, representative.id, brand_id)
            .await?;
        if removed == 0 {
            return Err(AppError::NotFound("Vínculo de marca"));
        }

        Ok(())
    }
}
