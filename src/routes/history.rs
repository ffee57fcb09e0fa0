use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CurrentUser, HistoryEntry},
    routes::AppState,
};

const HISTORY_LIMIT: i64 = 20;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
    pub save_history_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleHistoryRequest {
    #[serde(default = "enabled_by_default")]
    pub enable: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct ToggleHistoryResponse {
    pub success: bool,
    pub save_history: bool,
    pub message: String,
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<HistoryResponse>> {
    let history = state.repo.recent_history(user.user_id, HISTORY_LIMIT).await?;

    Ok(Json(HistoryResponse {
        history,
        save_history_enabled: user.save_history,
    }))
}

/// Turns history recording on or off for the current session
pub async fn toggle_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<ToggleHistoryRequest>,
) -> AppResult<Json<ToggleHistoryResponse>> {
    state.repo.set_save_history(&user.token, request.enable).await?;
    tracing::info!(user_id = user.user_id, enabled = request.enable, "History recording toggled");

    Ok(Json(ToggleHistoryResponse {
        success: true,
        save_history: request.enable,
        message: format!(
            "Search history saving is now {}",
            if request.enable { "ON" } else { "OFF" }
        ),
    }))
}
