//! User listing endpoint, administrator only.

use api_types::user::UserView;
use axum::{Json, extract::State};
use engine::User;

use crate::{ServerError, server::ServerState};

pub fn view(user: User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role.as_str().to_string(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.engine.list_users().await?;
    Ok(Json(users.into_iter().map(view).collect()))
}
