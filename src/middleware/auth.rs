use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, routes::AppState};

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the bearer token into a `CurrentUser` extension; 401 otherwise
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))?
        .to_string();

    let current_user = state.repo.find_session(&token).await?;
    tracing::debug!(user_id = current_user.user_id, "Session resolved");

    request.extensions_mut().insert(current_user);
    Ok(next.run(request).await)
}
