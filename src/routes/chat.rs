use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::CurrentUser,
    routes::AppState,
    services::director::{self, ChatReply},
};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Identifies a movie from the user's description
pub async fn director_chat(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidInput("No message provided".to_string()));
    }

    let reply = director::respond(
        &state.identifier,
        state.provider.as_ref(),
        &state.repo,
        &user,
        message,
    )
    .await?;

    Ok(Json(reply))
}
