use crate::{
    models::MovieRecord,
    services::providers::{MovieProvider, SearchFilter},
};

/// Looks up a movie by free-text title
///
/// Takes the provider's first search hit and fetches its full record. Any
/// failure (transport, provider miss, empty result set) is logged and
/// reported as `None`, which callers treat as "movie not found".
pub async fn fetch_by_title(provider: &dyn MovieProvider, title: &str) -> Option<MovieRecord> {
    let hits = match provider.search(title, SearchFilter::default()).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(title = %title, provider = provider.name(), error = %e, "Title search failed");
            return None;
        }
    };

    let Some(external_id) = hits
        .into_iter()
        .next()
        .and_then(|hit| hit.imdb_id)
        .filter(|id| !id.is_empty())
    else {
        tracing::info!(title = %title, "No search results");
        return None;
    };

    match provider.fetch_details(&external_id).await {
        Ok(details) => {
            let record = MovieRecord::from(details);
            tracing::info!(title = %title, imdb_id = %record.external_id, "Movie found");
            Some(record)
        }
        Err(e) => {
            tracing::warn!(title = %title, imdb_id = %external_id, error = %e, "Detail lookup failed");
            None
        }
    }
}
