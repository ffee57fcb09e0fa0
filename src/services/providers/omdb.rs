//! OMDb API provider
//!
//! API Flow:
//! 1. Search: `/?s={query}` → list of hits with IMDb IDs
//! 2. Details: `/?i={imdb_id}&plot=short` → full record
//!
//! OMDb answers HTTP 200 even for misses; the `Response` field carries the
//! outcome, with the reason in `Error`.

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, OmdbSearchResponse, SearchHit},
    services::providers::{MovieProvider, SearchFilter},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a new OMDb provider whose calls are bounded by `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_params(&self, query: &str, filter: SearchFilter) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("s", query.to_string()),
        ];
        if filter.movies_only {
            params.push(("type", "movie".to_string()));
        }
        if let Some(page) = filter.page {
            params.push(("page", page.to_string()));
        }
        params
    }

    async fn get(&self, params: &[(&str, String)]) -> AppResult<reqwest::Response> {
        let url = format!("{}/", self.api_url);
        let response = self.http_client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbProvider {
    async fn search(&self, query: &str, filter: SearchFilter) -> AppResult<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response = self.get(&self.search_params(query, filter)).await?;
        let results: OmdbSearchResponse = response.json().await?;

        if !results.is_success() {
            return Err(AppError::NotFound(
                results.error.unwrap_or_else(|| format!("No results for {}", query)),
            ));
        }

        let hits = results.search.unwrap_or_default();

        tracing::debug!(
            query = %query,
            page = ?filter.page,
            results = hits.len(),
            provider = "omdb",
            "Search completed"
        );

        Ok(hits)
    }

    async fn fetch_details(&self, external_id: &str) -> AppResult<MovieDetails> {
        let params = [
            ("apikey", self.api_key.clone()),
            ("i", external_id.to_string()),
            ("plot", "short".to_string()),
        ];

        let response = self.get(&params).await?;
        let response_text = response.text().await?;

        let details: MovieDetails = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        if !details.is_success() {
            return Err(AppError::NotFound(
                details
                    .error
                    .unwrap_or_else(|| format!("No details for {}", external_id)),
            ));
        }

        tracing::debug!(imdb_id = %external_id, provider = "omdb", "Details fetched");

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
