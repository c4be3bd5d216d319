// src/middleware/rbac.rs
//
// O guardião de papel: filtro grosso e barato que roda ANTES de qualquer
// checagem de recurso. Barra quem nem tem papel para estar no grupo de
// rotas; quem passa ainda precisa vencer o predicado de acesso do
// recurso em questão.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

/// 1. O Trait que define o que um grupo de rotas exige
pub trait RoleRequirement: Send + Sync + 'static {
    fn required() -> &'static [Role];
}

/// 2. O Extractor (Guardião)
pub struct RequireAnyRole<T>(pub PhantomData<T>);

/// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequireAnyRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário injetado pelo auth_middleware
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        // B. Interseção com os papéis exigidos. Nenhum em comum: 403.
        let required = T::required();
        if !user.has_any_role(required) {
            return Err(AppError::RoleForbidden(required_label(required)));
        }

        Ok(RequireAnyRole(PhantomData))
    }
}

fn required_label(required: &[Role]) -> String {
    required
        .iter()
        .map(|role| role.label())
        .collect::<Vec<_>>()
        .join(" ou ")
}

// ---
// DEFINIÇÃO DOS GRUPOS DE PAPÉIS
// ---

// Rotas do lado do fabricante (catálogo, representantes, fabricantes).
pub struct ManufacturerStaff;
impl RoleRequirement for ManufacturerStaff {
    fn required() -> &'static [Role] {
        &[Role::Apoderado, Role::Admin]
    }
}

// Administração de usuários.
pub struct AdminOnly;
impl RoleRequirement for AdminOnly {
    fn required() -> &'static [Role] {
        &[Role::Admin]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::RoleSet;

    #[test]
    fn required_label_joins_with_ou() {
        assert_eq!(
            required_label(ManufacturerStaff::required()),
            "apoderado ou admin"
        );
        assert_eq!(required_label(AdminOnly::required()), "admin");
    }

    #[test]
    fn manufacturer_staff_gate_matches_role_sets() {
        let required = ManufacturerStaff::required();
        assert!([Role::Apoderado].has_any_role(required));
        assert!([Role::Admin, Role::UsuarioBienes].has_any_role(required));
        assert!(![Role::UsuarioBienes].has_any_role(required));
    }

    #[test]
    fn admin_gate_rejects_everyone_else() {
        let required = AdminOnly::required();
        assert!([Role::Admin].has_any_role(required));
        assert!(![Role::Apoderado, Role::UsuarioBienes].has_any_role(required));
    }
}
