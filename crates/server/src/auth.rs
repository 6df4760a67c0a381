//! Authentication endpoints: register, login and the current-user probe.

use api_types::auth::{LoginRequest, RegisterRequest, TokenResponse};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::NewUser;

use crate::{ServerError, password, server::ServerState, token, users};

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ServerError> {
    let password_hash = password::hash_password(&payload.password).await?;
    let user = state
        .engine
        .register_user(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
        })
        .await?;

    let token = token::issue(user.id, &state.auth.jwt_secret)
        .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ServerError> {
    let user = state
        .engine
        .user_by_email(&payload.email)
        .await?
        .ok_or(ServerError::Unauthorized)?;

    if !password::verify_password(&payload.password, &user.password_hash).await? {
        return Err(ServerError::Unauthorized);
    }

    let token = token::issue(user.id, &state.auth.jwt_secret)
        .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))?;

    Ok(Json(TokenResponse { token }))
}

pub async fn me(
    Extension(user): Extension<engine::User>,
) -> Json<api_types::user::UserView> {
    Json(users::view(user))
}
