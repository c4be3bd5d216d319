// src/services/access_service.rs
//
// O núcleo de autorização. Um mesmo recurso pode ser alcançado por mais
// de um caminho de posse: dono direto, apoderado do fabricante, ou
// administrador delegado do fabricante. Cada predicado aqui decide
// "este usuário pode agir sobre esta instância?" compondo a checagem de
// dono com o escopo de tenant, e devolve `false` para negar, nunca um
// erro. `Err` fica reservado para falha de infraestrutura.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ManufacturerRepository, RepresentativeRepository},
    models::{
        catalog::{Brand, Part, Product},
        inventory::InventoryItem,
        manufacturer::{Manufacturer, ManufacturerStatus},
        representative::Representative,
        warranty::Warranty,
    },
};

// ---
// Regras puras
// ---
// Separadas das consultas para serem compartilhadas entre os predicados
// e os testes. Sem fabricante resolvido não há acesso além da posse
// (negação por omissão).

fn in_scope(manufacturer_id: Option<Uuid>, scope: &[Uuid]) -> bool {
    manufacturer_id.is_some_and(|id| scope.contains(&id))
}

// A regra completa de um salto: dono direto OU fabricante no escopo.
fn owner_or_in_scope(
    user_id: Uuid,
    owner_user_id: Uuid,
    manufacturer_id: Option<Uuid>,
    scope: &[Uuid],
) -> bool {
    owner_user_id == user_id || in_scope(manufacturer_id, scope)
}

// Disjunção sobre as marcas atendidas: basta UMA marca de fabricante
// dentro do escopo. O `any` para na primeira que bater.
fn any_manufacturer_in_scope(manufacturer_ids: &[Option<Uuid>], scope: &[Uuid]) -> bool {
    manufacturer_ids.iter().any(|id| in_scope(*id, scope))
}

#[derive(Clone)]
pub struct AccessService {
    manufacturer_repo: ManufacturerRepository,
    catalog_repo: CatalogRepository,
    representative_repo: RepresentativeRepository,
}

impl AccessService {
    pub fn new(
        manufacturer_repo: ManufacturerRepository,
        catalog_repo: CatalogRepository,
        representative_repo: RepresentativeRepository,
    ) -> Self {
        Self {
            manufacturer_repo,
            catalog_repo,
            representative_repo,
        }
    }

    /// Em nome de quais fabricantes o usuário pode agir (apoderado ou
    /// delegado). Consulta sempre fresca: uma delegação removida deixa
    /// de valer já na próxima requisição.
    pub async fn tenant_scope(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        self.manufacturer_repo.tenant_scope(user_id).await
    }

    /// Escopo restrito a fabricantes com um status específico.
    pub async fn tenant_scope_with_status(
        &self,
        user_id: Uuid,
        status: ManufacturerStatus,
    ) -> Result<Vec<Uuid>, AppError> {
        self.manufacturer_repo
            .tenant_scope_with_status(user_id, status)
            .await
    }

    // O esqueleto comum a todos os recursos de um salto. O dono
    // curto-circuita antes de qualquer consulta de escopo.
    async fn allowed_one_hop(
        &self,
        user_id: Uuid,
        owner_user_id: Uuid,
        manufacturer_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        if owner_user_id == user_id {
            return Ok(true);
        }

        let scope = self.tenant_scope(user_id).await?;
        Ok(owner_or_in_scope(
            user_id,
            owner_user_id,
            manufacturer_id,
            &scope,
        ))
    }

    /// O próprio fabricante é acessível a quem está no escopo dele.
    /// O apoderado tem acesso implícito sempre, sem consulta extra.
    pub async fn can_access_manufacturer(
        &self,
        user_id: Uuid,
        manufacturer: &Manufacturer,
    ) -> Result<bool, AppError> {
        if manufacturer.legal_representative_id == user_id {
            return Ok(true);
        }
        let scope = self.tenant_scope(user_id).await?;
        Ok(scope.contains(&manufacturer.id))
    }

    pub async fn can_access_brand(&self, user_id: Uuid, brand: &Brand) -> Result<bool, AppError> {
        self.allowed_one_hop(user_id, brand.owner_user_id, brand.manufacturer_id)
            .await
    }

    pub async fn can_access_product(
        &self,
        user_id: Uuid,
        product: &Product,
    ) -> Result<bool, AppError> {
        self.allowed_one_hop(user_id, product.owner_user_id, product.manufacturer_id)
            .await
    }

    pub async fn can_access_part(&self, user_id: Uuid, part: &Part) -> Result<bool, AppError> {
        self.allowed_one_hop(user_id, part.owner_user_id, part.manufacturer_id)
            .await
    }

    pub async fn can_access_warranty(
        &self,
        user_id: Uuid,
        warranty: &Warranty,
    ) -> Result<bool, AppError> {
        self.allowed_one_hop(user_id, warranty.owner_user_id, warranty.manufacturer_id)
            .await
    }

    /// Dois saltos: item -> produto/peça -> fabricante. Uma referência
    /// que não resolve (produto apagado, item sem vínculo) NEGA o
    /// acesso; ausência de prova é ausência de acesso.
    pub async fn can_access_inventory_item(
        &self,
        user_id: Uuid,
        item: &InventoryItem,
    ) -> Result<bool, AppError> {
        if item.owner_user_id == user_id {
            return Ok(true);
        }

        let linked_manufacturer = match (item.product_id, item.part_id) {
            (Some(product_id), _) => self
                .catalog_repo
                .find_product_by_id(product_id)
                .await?
                .and_then(|product| product.manufacturer_id),
            (None, Some(part_id)) => self
                .catalog_repo
                .find_part_by_id(part_id)
                .await?
                .and_then(|part| part.manufacturer_id),
            (None, None) => None,
        };

        self.allowed_one_hop(user_id, item.owner_user_id, linked_manufacturer)
            .await
    }

    /// Dois saltos via tabela-ponte: representante -> marcas atendidas
    /// -> fabricante. Basta uma marca no escopo.
    pub async fn can_access_representative(
        &self,
        user_id: Uuid,
        representative: &Representative,
    ) -> Result<bool, AppError> {
        if representative.owner_user_id == user_id {
            return Ok(true);
        }

        let represented = self
            .representative_repo
            .represented_manufacturers(representative.id)
            .await?;
        if represented.is_empty() {
            return Ok(false);
        }

        let scope = self.tenant_scope(user_id).await?;
        Ok(any_manufacturer_in_scope(&represented, &scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    // O dono sempre tem acesso, com qualquer escopo (inclusive vazio).
    #[test]
    fn owner_always_has_access() {
        let user = Uuid::new_v4();
        let manufacturer = Uuid::new_v4();
        assert!(owner_or_in_scope(user, user, None, &[]));
        assert!(owner_or_in_scope(user, user, Some(manufacturer), &[]));
    }

    // Delegado/apoderado herda o acesso via escopo, mesmo sem ser dono.
    #[test]
    fn scope_membership_grants_access_to_non_owner() {
        let user = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let manufacturer = Uuid::new_v4();
        assert!(owner_or_in_scope(
            user,
            owner,
            Some(manufacturer),
            &[manufacturer]
        ));
    }

    // Nem dono, nem escopo: negado.
    #[test]
    fn stranger_is_denied() {
        let user = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let manufacturer = Uuid::new_v4();
        let scope = ids(3);
        assert!(!owner_or_in_scope(user, owner, Some(manufacturer), &scope));
    }

    // Recurso sem fabricante: só a posse conta (negação por omissão).
    #[test]
    fn missing_manufacturer_fails_closed() {
        let user = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let scope = ids(3);
        assert!(!owner_or_in_scope(user, owner, None, &scope));
        assert!(!in_scope(None, &scope));
    }

    #[test]
    fn any_manufacturer_in_scope_is_a_disjunction() {
        let scope = ids(2);
        let outside = Uuid::new_v4();

        // Uma marca dentro do escopo basta, independentemente da ordem.
        assert!(any_manufacturer_in_scope(
            &[Some(outside), None, Some(scope[1])],
            &scope
        ));

        // Nenhuma dentro: negado.
        assert!(!any_manufacturer_in_scope(&[Some(outside), None], &scope));

        // Sem marcas atendidas: negado.
        assert!(!any_manufacturer_in_scope(&[], &scope));
    }

    // Marcas sem fabricante não contam para a disjunção.
    #[test]
    fn brands_without_manufacturer_grant_nothing() {
        let scope = ids(2);
        assert!(!any_manufacturer_in_scope(&[None, None, None], &scope));
    }
}
