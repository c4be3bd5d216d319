// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Os papéis do sistema. Conjunto fechado: não existe hierarquia nem
// papel configurável. O valor serializado ("usuario_bienes" etc.) é o
// mesmo que o sistema antigo gravava no campo escalar "role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Apoderado,
    UsuarioBienes,
}

impl Role {
    // Rótulo para mensagens de erro ("é necessário o papel apoderado ou admin").
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Apoderado => "apoderado",
            Role::UsuarioBienes => "usuario_bienes",
        }
    }
}

// Predicados sobre conjuntos de papéis. Implementado para fatias para
// funcionar tanto com `user.roles` quanto com os papéis crus do token.
pub trait RoleSet {
    fn has_role(&self, role: Role) -> bool;
    fn has_any_role(&self, roles: &[Role]) -> bool;
    fn has_all_roles(&self, roles: &[Role]) -> bool;
    fn primary_role(&self) -> Role;
}

impl RoleSet for [Role] {
    fn has_role(&self, role: Role) -> bool {
        self.contains(&role)
    }

    fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.contains(role))
    }

    fn has_all_roles(&self, roles: &[Role]) -> bool {
        roles.iter().all(|role| self.contains(role))
    }

    // Projeção determinística para os consumidores antigos que esperam um
    // papel único (prioridade: admin > apoderado > usuario_bienes).
    // Conjunto vazio cai em `apoderado`. ATENÇÃO: isto é um atalho de
    // compatibilidade para rótulos de UI. Nenhuma decisão de acesso
    // pode passar por aqui.
    fn primary_role(&self) -> Role {
        if self.contains(&Role::Admin) {
            Role::Admin
        } else if self.contains(&Role::Apoderado) {
            Role::Apoderado
        } else if self.contains(&Role::UsuarioBienes) {
            Role::UsuarioBienes
        } else {
            Role::Apoderado
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub full_name: String,

    // Multi-papel: sempre não-vazio (garantido por CHECK no banco e
    // pela validação dos payloads de admin).
    pub roles: Vec<Role>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.has_role(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.roles.has_any_role(roles)
    }

    pub fn has_all_roles(&self, roles: &[Role]) -> bool {
        self.roles.has_all_roles(roles)
    }

    pub fn primary_role(&self) -> Role {
        self.roles.primary_role()
    }
}

// Dados para registro público. O fluxo público SEMPRE atribui
// {usuario_bienes}; papéis administrativos só entram via admin.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,        // Subject (ID do usuário)
    pub roles: Vec<Role>, // Conjunto cru de papéis no momento do login
    pub exp: usize,       // Expiration time (quando o token expira)
    pub iat: usize,       // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_role_is_membership() {
        let roles = [Role::Apoderado, Role::UsuarioBienes];
        assert!(roles.has_role(Role::Apoderado));
        assert!(roles.has_role(Role::UsuarioBienes));
        assert!(!roles.has_role(Role::Admin));
    }

    #[test]
    fn has_any_role_is_intersection() {
        let roles = [Role::UsuarioBienes];
        assert!(roles.has_any_role(&[Role::Apoderado, Role::UsuarioBienes]));
        assert!(!roles.has_any_role(&[Role::Apoderado, Role::Admin]));
        // Lista de alvos vazia: interseção vazia, logo falso.
        assert!(!roles.has_any_role(&[]));
    }

    #[test]
    fn has_all_roles_is_subset() {
        let roles = [Role::Admin, Role::Apoderado];
        assert!(roles.has_all_roles(&[Role::Admin]));
        assert!(roles.has_all_roles(&[Role::Admin, Role::Apoderado]));
        assert!(!roles.has_all_roles(&[Role::Admin, Role::UsuarioBienes]));
    }

    #[test]
    fn empty_set_denies_everything_except_vacuous_all() {
        let empty: [Role; 0] = [];
        assert!(!empty.has_role(Role::Admin));
        assert!(!empty.has_any_role(&[Role::Admin, Role::Apoderado]));
        // Subconjunto vazio de qualquer conjunto: verdadeiro por vacuidade.
        assert!(empty.has_all_roles(&[]));
        assert!(!empty.has_all_roles(&[Role::Admin]));
    }

    #[test]
    fn primary_role_follows_priority_order() {
        assert_eq!(
            [Role::UsuarioBienes, Role::Apoderado, Role::Admin].primary_role(),
            Role::Admin
        );
        assert_eq!(
            [Role::UsuarioBienes, Role::Apoderado].primary_role(),
            Role::Apoderado
        );
        assert_eq!([Role::UsuarioBienes].primary_role(), Role::UsuarioBienes);
    }

    #[test]
    fn primary_role_of_empty_set_falls_back_to_apoderado() {
        let empty: [Role; 0] = [];
        assert_eq!(empty.primary_role(), Role::Apoderado);
    }

    #[test]
    fn roles_serialize_with_legacy_tags() {
        assert_eq!(
            serde_json::to_string(&Role::UsuarioBienes).unwrap(),
            "\"usuario_bienes\""
        );
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Apoderado).unwrap(),
            "\"apoderado\""
        );
    }
}
