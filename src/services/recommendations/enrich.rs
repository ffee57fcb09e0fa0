use std::sync::Arc;

use crate::{
    models::{
        movie::NOT_AVAILABLE, CandidateStub, EnrichedCandidate, MovieDetails, MovieRecord,
    },
    services::providers::MovieProvider,
};

use super::scoring;

/// Most stubs fetched in detail per request
pub const ENRICHMENT_LIMIT: usize = 15;

/// Poster used for a recommendation without artwork
pub const RECOMMENDATION_POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/300x450/667eea/ffffff?text=No+Poster";

const ABSENT_POSTER_VALUES: [&str; 3] = ["n/a", "none", "null"];

fn is_usable_poster(poster: &str) -> bool {
    let poster = poster.trim();
    !poster.is_empty() && !ABSENT_POSTER_VALUES.contains(&poster.to_lowercase().as_str())
}

/// Detail poster, then the harvested poster, then the placeholder
pub fn resolve_poster(detail_poster: Option<&str>, stub_poster: &str) -> String {
    detail_poster
        .into_iter()
        .chain(std::iter::once(stub_poster))
        .find(|p| is_usable_poster(p))
        .map(|p| p.trim().to_string())
        .unwrap_or_else(|| RECOMMENDATION_POSTER_PLACEHOLDER.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn build_candidate(
    original: &MovieRecord,
    stub: CandidateStub,
    details: MovieDetails,
) -> EnrichedCandidate {
    let poster_url = resolve_poster(details.poster.as_deref(), &stub.poster_url);
    let title = non_empty(details.title.clone()).unwrap_or(stub.title);
    let release_year = non_empty(details.year.clone())
        .or_else(|| non_empty(Some(stub.release_year)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let external_id = non_empty(details.imdb_id.clone()).unwrap_or(stub.external_id);

    let record = MovieRecord::from(details);
    let breakdown = scoring::breakdown(original, &record);

    tracing::debug!(
        title = %title,
        strategy = %stub.source,
        score = breakdown.total(),
        genre = breakdown.genre,
        director = breakdown.director,
        actor = breakdown.actor,
        year = breakdown.year,
        rating = breakdown.rating,
        "Candidate scored"
    );

    EnrichedCandidate {
        title,
        poster_url,
        release_year,
        rating: record.rating,
        genre: record.genre,
        director: record.director,
        external_id,
        relevance_score: breakdown.total(),
        source: stub.source,
    }
}

/// Fetches details for up to [`ENRICHMENT_LIMIT`] stubs and scores them
///
/// Lookups run concurrently; output keeps stub order. Stubs without an
/// identifier or whose lookup fails are left out.
pub async fn enrich(
    provider: Arc<dyn MovieProvider>,
    original: &MovieRecord,
    stubs: Vec<CandidateStub>,
) -> Vec<EnrichedCandidate> {
    let mut tasks = Vec::new();

    for stub in stubs.into_iter().take(ENRICHMENT_LIMIT) {
        if stub.external_id.is_empty() {
            continue;
        }
        let provider = Arc::clone(&provider);
        let external_id = stub.external_id.clone();
        let task = tokio::spawn(async move { provider.fetch_details(&external_id).await });
        tasks.push((stub, task));
    }

    let mut enriched = Vec::with_capacity(tasks.len());

    for (stub, task) in tasks {
        match task.await {
            Ok(Ok(details)) => enriched.push(build_candidate(original, stub, details)),
            Ok(Err(e)) => {
                tracing::debug!(
                    title = %stub.title,
                    imdb_id = %stub.external_id,
                    error = %e,
                    "Skipping candidate without details"
                );
            }
            Err(e) => {
                tracing::error!(title = %stub.title, error = %e, "Task join error");
            }
        }
    }

    enriched
}
