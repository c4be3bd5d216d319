// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// A taxonomia importa: "proibido por papel" e "proibido por posse" são
// erros diferentes de "não encontrado", e nunca podem se confundir.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // Recurso inexistente. O argumento é o nome do recurso ("Produto", "Marca"...).
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    // O chamador não tem nenhum dos papéis exigidos pela rota.
    #[error("Papel insuficiente: é necessário {0}")]
    RoleForbidden(String),

    // O recurso existe, mas o chamador não é dono nem está no escopo
    // do fabricante. Nunca vira 404: o recurso foi carregado.
    #[error("Sem autorização sobre este recurso: {0}")]
    OwnershipForbidden(&'static str),

    // Exclusão bloqueada por dependentes (regra de negócio, não autorização).
    #[error("Exclusão bloqueada: {0}")]
    ReferentialIntegrity(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E-mail ou senha inválidos.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                format!("{} não encontrado(a).", resource),
            ),
            AppError::RoleForbidden(required) => (
                StatusCode::FORBIDDEN,
                format!("Acesso negado: é necessário o papel {}.", required),
            ),
            AppError::OwnershipForbidden(resource) => (
                StatusCode::FORBIDDEN,
                format!("Você não tem autorização sobre este(a) {}.", resource),
            ),
            AppError::ReferentialIntegrity(message) => (StatusCode::CONFLICT, message),
            AppError::UniqueConstraintViolation(message) => (StatusCode::CONFLICT, message),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente vê algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Proibição por posse nunca pode virar 404: o recurso existe.
    #[test]
    fn ownership_forbidden_is_403() {
        let response = AppError::OwnershipForbidden("produto").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn role_forbidden_is_403() {
        let response = AppError::RoleForbidden("apoderado ou admin".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_is_404() {
        let response = AppError::NotFound("Produto").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn referential_integrity_is_409() {
        let response =
            AppError::ReferentialIntegrity("A marca ainda possui produtos.".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_is_400() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("name", validator::ValidationError::new("required"));
        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
