use crate::models::{EnrichedCandidate, Recommendation, RecommendationPage};

pub const PAGE_SIZE: usize = 3;

/// Ranks candidates by relevance and returns the requested page
///
/// Ties keep their incoming order. Pages below 1 are treated as page 1.
pub fn paginate(mut candidates: Vec<EnrichedCandidate>, page: u32) -> RecommendationPage {
    let page = page.max(1) as usize;
    candidates.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

    let start = (page - 1).saturating_mul(PAGE_SIZE);
    let end = page.saturating_mul(PAGE_SIZE);
    let has_more = candidates.len() > end;

    let items = candidates
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .map(Recommendation::from)
        .collect();

    RecommendationPage { items, has_more }
}
