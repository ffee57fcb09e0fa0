use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{CurrentUser, MovieRecord, MovieView, Recommendation, RecommendationPage},
    routes::AppState,
    services::{recommendations, title_search},
};

const HEALTH_CHECK_TITLE: &str = "Avatar";

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub movie: MovieView,
    pub recommendations: Vec<Recommendation>,
    pub has_more_recommendations: bool,
    pub recommendation_page: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub movie_data: Option<MovieRecord>,
    #[serde(default = "default_next_page")]
    pub page: u32,
    #[serde(default)]
    pub exclude_titles: Vec<String>,
}

fn default_next_page() -> u32 {
    2
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
    pub has_more_recommendations: bool,
    pub recommendation_page: u32,
}

impl RecommendationsResponse {
    fn new(page: RecommendationPage, number: u32) -> Self {
        Self {
            recommendations: page.items,
            has_more_recommendations: page.has_more,
            recommendation_page: number,
        }
    }
}

/// Looks up a title and returns it with the first page of recommendations
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("No movie title provided".to_string()));
    }

    tracing::info!(request_id = %request_id, query = %query, "Processing search request");

    if user.save_history {
        state.repo.add_history(user.user_id, query).await?;
    }

    let movie = title_search::fetch_by_title(state.provider.as_ref(), query)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!("Movie \"{}\" not found. Try another title.", query))
        })?;

    let page =
        recommendations::recommend(Arc::clone(&state.provider), &movie, 1, &HashSet::new()).await;
    let is_favorite = state.repo.is_favorite(user.user_id, &movie.external_id).await?;

    Ok(Json(SearchResponse {
        movie: MovieView { movie, is_favorite },
        recommendations: page.items,
        has_more_recommendations: page.has_more,
        recommendation_page: 1,
    }))
}

/// Further recommendation pages for a movie the client already has
pub async fn more_recommendations(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationsRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    let movie = request
        .movie_data
        .ok_or_else(|| AppError::InvalidInput("Movie data required".to_string()))?;

    if request.page == 0 {
        return Err(AppError::InvalidInput("page must be at least 1".to_string()));
    }

    let exclude: HashSet<String> = request.exclude_titles.into_iter().collect();
    let page =
        recommendations::recommend(Arc::clone(&state.provider), &movie, request.page, &exclude)
            .await;

    Ok(Json(RecommendationsResponse::new(page, request.page)))
}

/// Checks that the movie provider answers a known lookup
pub async fn test_api(State(state): State<Arc<AppState>>) -> Json<Value> {
    if !state.config.is_omdb_configured() {
        tracing::warn!("OMDb API key is not configured");
    }

    match title_search::fetch_by_title(state.provider.as_ref(), HEALTH_CHECK_TITLE).await {
        Some(movie) => Json(json!({
            "status": "✅ OMDB API is working!",
            "movie": movie,
        })),
        None => Json(json!({
            "status": "❌ OMDB API not working. Check your API key.",
            "error": "Make sure you have a valid OMDB API key in your .env file",
        })),
    }
}
