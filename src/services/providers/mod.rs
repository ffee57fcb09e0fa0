//! Movie metadata provider abstraction
//!
//! The recommendation pipeline and the title lookup only ever talk to this
//! trait, so tests can substitute canned data for the OMDb HTTP client.

use crate::{
    error::AppResult,
    models::{MovieDetails, SearchHit},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Options for a free-text search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Result page, provider default when `None`
    pub page: Option<u32>,
    /// Restrict results to movies (no series or episodes)
    pub movies_only: bool,
}

impl SearchFilter {
    pub fn movies(page: u32) -> Self {
        Self {
            page: Some(page),
            movies_only: true,
        }
    }
}

/// Trait for movie metadata providers
///
/// Both operations are read-only and idempotent. An empty result set or a
/// provider-side "not found" is reported as `AppError::NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search by free-text query, results in provider ranking order
    async fn search(&self, query: &str, filter: SearchFilter) -> AppResult<Vec<SearchHit>>;

    /// Fetch the full record for a provider identifier
    async fn fetch_details(&self, external_id: &str) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
