// src/services/manufacturer_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ManufacturerRepository,
    models::{
        auth::{Role, User},
        manufacturer::{Manufacturer, ManufacturerDelegate, ManufacturerStatus},
    },
    services::access_service::AccessService,
};

#[derive(Clone)]
pub struct ManufacturerService {
    manufacturer_repo: ManufacturerRepository,
    access_service: AccessService,
    pool: PgPool,
}

impl ManufacturerService {
    pub fn new(
        manufacturer_repo: ManufacturerRepository,
        access_service: AccessService,
        pool: PgPool,
    ) -> Self {
        Self {
            manufacturer_repo,
            access_service,
            pool,
        }
    }

    // O cadastro do fabricante é o único recurso em que o papel admin
    // atravessa o escopo: administrar tenants (trocar apoderado, delegar,
    // suspender) é atribuição dele. O catálogo e os demais recursos
    // continuam estritamente dono-ou-escopo.
    async fn ensure_access(
        &self,
        caller: &User,
        manufacturer: &Manufacturer,
    ) -> Result<(), AppError> {
        if caller.has_role(Role::Admin) {
            return Ok(());
        }
        if self
            .access_service
            .can_access_manufacturer(caller.id, manufacturer)
            .await?
        {
            return Ok(());
        }
        Err(AppError::OwnershipForbidden("fabricante"))
    }

    // Quem cria vira o apoderado (representante legal).
    pub async fn create(
        &self,
        caller: &User,
        name: &str,
        tax_id: Option<&str>,
    ) -> Result<Manufacturer, AppError> {
        self.manufacturer_repo
            .create(&self.pool, caller.id, name, tax_id)
            .await
    }

    // Listagem pelo escopo do usuário. O filtro de status usa a variante
    // estreita do resolvedor, não um pós-filtro em memória.
    pub async fn list(
        &self,
        caller_id: Uuid,
        status: Option<ManufacturerStatus>,
    ) -> Result<Vec<Manufacturer>, AppError> {
        let scope = match status {
            Some(status) => {
                self.access_service
                    .tenant_scope_with_status(caller_id, status)
                    .await?
            }
            None => self.access_service.tenant_scope(caller_id).await?,
        };

        self.manufacturer_repo.find_by_ids(&scope).await
    }

    pub async fn get(&self, caller: &User, id: Uuid) -> Result<Manufacturer, AppError> {
        let manufacturer = self
            .manufacturer_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Fabricante"))?;

        self.ensure_access(caller, &manufacturer).await?;
        Ok(manufacturer)
    }

    pub async fn update(
        &self,
        caller: &User,
        id: Uuid,
        name: Option<&str>,
        tax_id: Option<&str>,
        status: Option<ManufacturerStatus>,
        new_legal_representative_id: Option<Uuid>,
    ) -> Result<Manufacturer, AppError> {
        // Carrega e checa o acesso sobre a instância fresca.
        let manufacturer = self.get(caller, id).await?;

        // Trocar o apoderado é privilégio de admin, mesmo para o próprio
        // apoderado atual.
        if new_legal_representative_id.is_some() && !caller.has_role(Role::Admin) {
            return Err(AppError::RoleForbidden("admin".into()));
        }

        let mut tx = self.pool.begin().await?;

        let mut updated = self
            .manufacturer_repo
            .update(&mut *tx, manufacturer.id, name, tax_id, status)
            .await?
            .ok_or(AppError::NotFound("Fabricante"))?;

        if let Some(new_representative) = new_legal_representative_id {
            updated = self
                .manufacturer_repo
                .update_legal_representative(&mut *tx, manufacturer.id, new_representative)
                .await?
                .ok_or(AppError::NotFound("Fabricante"))?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        let manufacturer = self.get(caller, id).await?;

        let dependents = self
            .manufacturer_repo
            .count_dependents(manufacturer.id)
            .await?;
        if dependents > 0 {
            return Err(AppError::ReferentialIntegrity(
                "O fabricante ainda possui marcas, produtos, peças ou garantias vinculadas."
                    .into(),
            ));
        }

        self.manufacturer_repo
            .delete(&self.pool, manufacturer.id)
            .await?;
        Ok(())
    }

    // =========================================================================
    //  DELEGADOS
    // =========================================================================
    // Delegar é conceder o acesso operacional do tenant inteiro; por isso
    // a regra é mais estreita que o escopo: só o apoderado do fabricante
    // (ou um admin) mexe na lista; delegado não delega.

    fn can_manage_delegates(caller: &User, manufacturer: &Manufacturer) -> bool {
        caller.has_role(Role::Admin) || manufacturer.legal_representative_id == caller.id
    }

    pub async fn list_delegates(
        &self,
        caller: &User,
        manufacturer_id: Uuid,
    ) -> Result<Vec<ManufacturerDelegate>, AppError> {
        let manufacturer = self.get(caller, manufacturer_id).await?;
        self.manufacturer_repo.list_delegates(manufacturer.id).await
    }

    pub async fn add_delegate(
        &self,
        caller: &User,
        manufacturer_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let manufacturer = self
            .manufacturer_repo
            .find_by_id(manufacturer_id)
            .await?
            .ok_or(AppError::NotFound("Fabricante"))?;

        if !Self::can_manage_delegates(caller, &manufacturer) {
            return Err(AppError::OwnershipForbidden("fabricante"));
        }

        self.manufacturer_repo
            .add_delegate(&self.pool, manufacturer.id, user_id)
            .await
    }

    pub async fn remove_delegate(
        &self,
        caller: &User,
        manufacturer_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let manufacturer = self
            .manufacturer_repo
            .find_by_id(manufacturer_id)
            .await?
            .ok_or(AppError::NotFound("Fabricante"))?;

        if !Self::can_manage_delegates(caller, &manufacturer) {
            return Err(AppError::OwnershipForbidden("fabricante"));
        }

        let removed = self
            .manufacturer_repo
            .remove_delegate(&self.pool, manufacturer.id, user_id)
            .await?;
        if removed == 0 {
            return Err(AppError::NotFound("Delegado"));
        }

        Ok(())
    }
}
