use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::Repository,
    middleware::{
        auth::require_session,
        request_id::{make_span_with_request_id, request_id_middleware},
    },
    services::{MovieIdentifier, MovieProvider},
};

pub mod accounts;
pub mod chat;
pub mod favorites;
pub mod history;
pub mod search;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub repo: Repository,
    pub provider: Arc<dyn MovieProvider>,
    pub identifier: MovieIdentifier,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(Arc::clone(&state)))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/test-api", get(search::test_api))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
}

/// Routes that need a signed-in user
fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/logout", post(accounts::logout))
        .route("/search", get(search::search))
        .route("/get_recommendations", post(search::more_recommendations))
        .route("/history", get(history::history))
        .route("/toggle_history", post(history::toggle_history))
        .route("/favorites", get(favorites::list))
        .route("/add_favorite", post(favorites::add))
        .route("/remove_favorite", post(favorites::remove))
        .route("/check_favorite/:movie_id", get(favorites::check))
        .route("/director_chat", post(chat::director_chat))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
