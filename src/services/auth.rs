// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Role, User},
};

// Hashing fora do executor async: bcrypt é caro de propósito.
pub(crate) async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

// Emissão/validação separadas do serviço para facilitar o teste do
// contrato do token (sub + papéis crus do momento do login).
fn issue_token(jwt_secret: &str, user: &User) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(7);

    let claims = Claims {
        sub: user.id,
        roles: user.roles.clone(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

fn decode_token(jwt_secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;

    Ok(token_data.claims)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            pool,
        }
    }

    // Registro público. O fluxo aberto atribui SEMPRE exatamente
    // {usuario_bienes}; qualquer outro papel só entra pela mão de um admin.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<String, AppError> {
        let hashed_password = hash_password(password).await?;

        let new_user = self
            .user_repo
            .create_user(
                &self.pool,
                email,
                &hashed_password,
                full_name,
                &[Role::UsuarioBienes],
            )
            .await?;

        issue_token(&self.jwt_secret, &new_user)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        issue_token(&self.jwt_secret, &user)
    }

    // Valida o token e recarrega o usuário: os papéis usados nas rotas
    // vêm SEMPRE do banco, nunca do que foi congelado no token.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user(roles: Vec<Role>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "ana@example.com".into(),
            password_hash: "hash".into(),
            full_name: "Ana".into(),
            roles,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_round_trip_preserves_subject_and_roles() {
        let user = sample_user(vec![Role::Apoderado, Role::UsuarioBienes]);
        let token = issue_token("segredo-de-teste", &user).unwrap();
        let claims = decode_token("segredo-de-teste", &token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.roles, user.roles);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let user = sample_user(vec![Role::UsuarioBienes]);
        let token = issue_token("segredo-a", &user).unwrap();

        let result = decode_token("segredo-b", &token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let result = decode_token("segredo", "nem.um.jwt");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
