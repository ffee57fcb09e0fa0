//! Advanced recommendations
//!
//! Pipeline: harvest candidate stubs from the provider (genre, director, lead
//! actor, release year) → prioritize and deduplicate → fetch details for the
//! top candidates → score against the original → return one page.
//!
//! Nothing is cached between calls; every page re-runs the whole pipeline
//! with the caller's growing exclusion set.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    models::{MovieRecord, RecommendationPage},
    services::providers::MovieProvider,
};

pub mod enrich;
pub mod harvest;
pub mod pagination;
pub mod prioritize;
pub mod scoring;

pub use enrich::enrich;
pub use harvest::harvest;
pub use pagination::paginate;
pub use prioritize::prioritize;
pub use scoring::score;

/// Generates one page of recommendations similar to `original`
///
/// Never fails: provider errors only shrink the candidate pool.
pub async fn recommend(
    provider: Arc<dyn MovieProvider>,
    original: &MovieRecord,
    page: u32,
    exclude_titles: &HashSet<String>,
) -> RecommendationPage {
    let start = Instant::now();
    let page = page.max(1);

    let mut exclude = exclude_titles.clone();
    if !original.title.is_empty() {
        exclude.insert(original.title.clone());
    }

    let stubs = harvest(Arc::clone(&provider), original, page, &exclude).await;
    let harvested = stubs.len();

    let prioritized = prioritize(stubs, &exclude);
    let enriched = enrich(provider, original, prioritized).await;
    let ranked = enriched.len();

    let result = paginate(enriched, page);

    tracing::info!(
        title = %original.title,
        page = page,
        harvested = harvested,
        ranked = ranked,
        returned = result.items.len(),
        has_more = result.has_more,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Recommendations computed"
    );

    result
}
