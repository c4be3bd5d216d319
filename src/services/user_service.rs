// src/services/user_service.rs
//
// Gestão administrativa de usuários. Só um admin chega aqui (o guardião
// de papel barra o resto na rota); este serviço cuida das regras que
// sobram: papéis não-vazios e e-mail único.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Role, User},
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    // Criação pela mão do admin: aqui os papéis vêm do payload (o
    // registro público, em AuthService, não passa por este caminho).
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        roles: &[Role],
    ) -> Result<User, AppError> {
        let hashed_password = hash_password(password).await?;

        self.user_repo
            .create_user(&self.pool, email, &hashed_password, full_name, roles)
            .await
    }

    pub async fn update_roles(&self, user_id: Uuid, roles: &[Role]) -> Result<User, AppError> {
        self.user_repo
            .update_roles(&self.pool, user_id, roles)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}
