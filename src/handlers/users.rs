// src/handlers/users.rs
//
// Administração de usuários. Tudo aqui passa pelo guardião AdminOnly:
// é o único lugar do sistema onde papéis são atribuídos ou alterados.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminOnly, RequireAnyRole},
    models::auth::{Role, User},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    // Diferente do registro público: o admin escolhe os papéis.
    #[validate(length(min = 1, message = "O usuário precisa de pelo menos um papel."))]
    pub roles: Vec<Role>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRolesPayload {
    #[validate(length(min = 1, message = "O usuário precisa de pelo menos um papel."))]
    pub roles: Vec<Role>,
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Lista de usuários", body = Vec<User>),
        (status = 403, description = "Papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireAnyRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_users().await?;
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireAnyRole<AdminOnly>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .user_service
        .create_user(
            &payload.email,
            &payload.password,
            &payload.full_name,
            &payload.roles,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /api/users/{id}/roles
#[utoipa::path(
    put,
    path = "/api/users/{id}/roles",
    tag = "Users",
    request_body = UpdateRolesPayload,
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Papéis atualizados", body = User),
        (status = 403, description = "Papel insuficiente"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_roles(
    State(app_state): State<AppState>,
    _guard: RequireAnyRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolesPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .user_service
        .update_roles(id, &payload.roles)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
