//! Card API endpoints.

use api_types::card::{CardNew, CardView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Card, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub fn view(card: Card) -> CardView {
    CardView {
        id: card.id,
        name: card.name,
        bank: card.bank,
        user_id: card.user_id,
    }
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<CardNew>,
) -> Result<(StatusCode, Json<CardView>), ServerError> {
    let card = state
        .engine
        .create_card(&payload.name, &payload.bank, user.id)
        .await?;
    Ok((StatusCode::CREATED, Json(view(card))))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CardView>>, ServerError> {
    let cards = state.engine.list_cards(&user).await?;
    Ok(Json(cards.into_iter().map(view).collect()))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_card(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
