use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    db::FavoriteRef,
    error::{AppError, AppResult},
    models::{CurrentUser, Favorite},
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub movie_id: Option<String>,
    pub movie_title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFavoriteRequest {
    pub favorite_id: Option<i64>,
    pub movie_id: Option<String>,
}

impl RemoveFavoriteRequest {
    fn target(self) -> Option<FavoriteRef> {
        match (self.favorite_id, self.movie_id) {
            (Some(id), _) => Some(FavoriteRef::Id(id)),
            (None, Some(movie_id)) if !movie_id.is_empty() => Some(FavoriteRef::Movie(movie_id)),
            _ => None,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<FavoritesResponse>> {
    let favorites = state.repo.list_favorites(user.user_id).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<AddFavoriteRequest>,
) -> AppResult<Json<Value>> {
    let (Some(movie_id), Some(movie_title)) =
        (present(request.movie_id), present(request.movie_title))
    else {
        return Err(AppError::InvalidInput("Missing movie data".to_string()));
    };

    let added = state
        .repo
        .add_favorite(user.user_id, &movie_id, &movie_title)
        .await?;

    let message = if added {
        tracing::info!(user_id = user.user_id, imdb_id = %movie_id, "Favorite added");
        "Added to favorites"
    } else {
        "Movie already in favorites"
    };

    Ok(Json(json!({ "message": message })))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<RemoveFavoriteRequest>,
) -> AppResult<Json<Value>> {
    let target = request
        .target()
        .ok_or_else(|| AppError::InvalidInput("Missing favorite data".to_string()))?;

    let removed = state.repo.remove_favorite(user.user_id, &target).await?;
    tracing::info!(user_id = user.user_id, target = ?target, removed = removed, "Favorite removed");

    Ok(Json(json!({ "message": "Removed from favorites" })))
}

pub async fn check(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(movie_id): Path<String>,
) -> AppResult<Json<Value>> {
    let is_favorite = state.repo.is_favorite(user.user_id, &movie_id).await?;
    Ok(Json(json!({ "is_favorite": is_favorite })))
}
