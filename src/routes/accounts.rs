use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::CurrentUser,
    routes::AppState,
    services::accounts,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    accounts::register(
        &state.repo,
        &request.username,
        &request.password,
        &request.confirm_password,
        state.config.password_hash_cost,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful! Please login." })),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let token = accounts::login(&state.repo, &request.username, &request.password).await?;

    Ok(Json(LoginResponse {
        token,
        username: request.username.trim().to_string(),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Value>> {
    accounts::logout(&state.repo, &user.token).await?;
    tracing::info!(user_id = user.user_id, "User logged out");

    Ok(Json(json!({ "message": "You have been logged out." })))
}
