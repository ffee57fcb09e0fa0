use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    models::{
        movie::{known, parse_year},
        CandidateStub, MovieRecord, SearchHit, Strategy,
    },
    services::providers::{MovieProvider, SearchFilter},
};

use super::scoring::YEAR_WINDOW;

/// How one strategy turns the original movie into provider searches
struct StrategyDescriptor {
    strategy: Strategy,
    queries: fn(&MovieRecord) -> Vec<String>,
    /// Upper bound on the requested page; `None` passes the caller's page through
    page_cap: Option<u32>,
    /// Keep only hits released within this many years of the original
    year_window: Option<i32>,
}

/// Strategies in harvest order
const STRATEGIES: [StrategyDescriptor; 4] = [
    StrategyDescriptor {
        strategy: Strategy::Genre,
        queries: genre_queries,
        page_cap: None,
        year_window: None,
    },
    StrategyDescriptor {
        strategy: Strategy::Director,
        queries: director_queries,
        page_cap: Some(2),
        year_window: None,
    },
    StrategyDescriptor {
        strategy: Strategy::Actor,
        queries: actor_queries,
        page_cap: Some(2),
        year_window: None,
    },
    StrategyDescriptor {
        strategy: Strategy::Year,
        queries: year_queries,
        page_cap: Some(2),
        year_window: Some(YEAR_WINDOW),
    },
];

const MAX_GENRE_QUERIES: usize = 2;
const MAX_DIRECTORS: usize = 2;

fn genre_queries(movie: &MovieRecord) -> Vec<String> {
    let Some(genre) = known(&movie.genre) else {
        return Vec::new();
    };

    genre
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .take(MAX_GENRE_QUERIES)
        .map(String::from)
        .collect()
}

/// Skipped for ensemble credits with more than two directors
fn director_queries(movie: &MovieRecord) -> Vec<String> {
    match known(&movie.director) {
        Some(director) if director.split(',').count() <= MAX_DIRECTORS => {
            first_token(director).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

fn actor_queries(movie: &MovieRecord) -> Vec<String> {
    known(&movie.actors)
        .and_then(first_token)
        .into_iter()
        .collect()
}

fn year_queries(movie: &MovieRecord) -> Vec<String> {
    parse_year(&movie.release_year)
        .map(|_| vec![movie.release_year.trim().to_string()])
        .unwrap_or_default()
}

/// First whitespace token of the first entry in a comma-separated list
fn first_token(list: &str) -> Option<String> {
    list.split(',')
        .next()?
        .split_whitespace()
        .next()
        .map(String::from)
}

/// A provider search derived from the original movie
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSearch {
    pub strategy: Strategy,
    pub query: String,
    pub page: u32,
    pub year_window: Option<i32>,
}

impl PlannedSearch {
    fn accepts(&self, original_year: Option<i32>, hit: &SearchHit) -> bool {
        let Some(window) = self.year_window else {
            return true;
        };

        let hit_year = hit.year.as_deref().and_then(parse_year);
        match (original_year, hit_year) {
            (Some(original), Some(candidate)) => (original - candidate).abs() <= window,
            _ => false,
        }
    }
}

/// Every search the strategies derive from `movie`, in harvest order
pub fn plan_searches(movie: &MovieRecord, page: u32) -> Vec<PlannedSearch> {
    STRATEGIES
        .iter()
        .flat_map(|descriptor| {
            let page = descriptor.page_cap.map_or(page, |cap| page.min(cap));
            (descriptor.queries)(movie)
                .into_iter()
                .map(move |query| PlannedSearch {
                    strategy: descriptor.strategy,
                    query,
                    page,
                    year_window: descriptor.year_window,
                })
        })
        .collect()
}

fn to_stub(strategy: Strategy, hit: SearchHit) -> Option<CandidateStub> {
    let title = hit.title.filter(|t| !t.is_empty())?;
    let poster_url = hit
        .poster
        .filter(|p| known(p).is_some())
        .unwrap_or_default();

    Some(CandidateStub {
        source: strategy,
        title,
        release_year: hit.year.unwrap_or_default(),
        poster_url,
        external_id: hit.imdb_id.unwrap_or_default(),
    })
}

/// Collects candidate stubs for `movie` from every strategy
///
/// Searches run concurrently but results are consumed in plan order, so the
/// output order matches a sequential harvest. A failing search only loses its
/// own hits. Stubs titled like the original, listed in `exclude`, or already
/// collected are dropped.
pub async fn harvest(
    provider: Arc<dyn MovieProvider>,
    movie: &MovieRecord,
    page: u32,
    exclude: &HashSet<String>,
) -> Vec<CandidateStub> {
    let mut tasks = Vec::new();

    for search in plan_searches(movie, page) {
        let provider = Arc::clone(&provider);
        let query = search.query.clone();
        let filter = SearchFilter::movies(search.page);
        let task = tokio::spawn(async move { provider.search(&query, filter).await });
        tasks.push((search, task));
    }

    let original_year = movie.year_value();
    let mut seen = HashSet::new();
    let mut stubs = Vec::new();

    for (search, task) in tasks {
        let hits = match task.await {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => {
                tracing::warn!(
                    strategy = %search.strategy,
                    query = %search.query,
                    error = %e,
                    "Strategy search failed"
                );
                continue;
            }
            Err(e) => {
                tracing::error!(strategy = %search.strategy, error = %e, "Task join error");
                continue;
            }
        };

        let before = stubs.len();
        for hit in hits {
            if !search.accepts(original_year, &hit) {
                continue;
            }
            let Some(stub) = to_stub(search.strategy, hit) else {
                continue;
            };
            if stub.title == movie.title || exclude.contains(&stub.title) {
                continue;
            }
            if seen.insert(stub.title.clone()) {
                stubs.push(stub);
            }
        }

        tracing::debug!(
            strategy = %search.strategy,
            query = %search.query,
            page = search.page,
            added = stubs.len() - before,
            "Strategy search harvested"
        );
    }

    stubs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockMovieProvider;
    use std::sync::Mutex;

    fn inception() -> MovieRecord {
        MovieRecord {
            title: "Inception".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            director: "Christopher Nolan".to_string(),
            actors: "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page".to_string(),
            release_year: "2010".to_string(),
            ..MovieRecord::default()
        }
    }

    fn hit(title: &str, year: &str, imdb_id: &str) -> SearchHit {
        SearchHit {
            title: Some(title.to_string()),
            year: Some(year.to_string()),
            imdb_id: Some(imdb_id.to_string()),
            kind: Some("movie".to_string()),
            poster: Some("N/A".to_string()),
        }
    }

    fn canned_search(query: &str) -> Result<Vec<SearchHit>, AppError> {
        match query {
            "Action" => Ok(vec![
                hit("Action Jackson", "1988", "tt0094612"),
                hit("Inception", "2010", "tt1375666"),
            ]),
            "Adventure" => Ok(vec![
                hit("Adventure Time", "2010", "tt1305826"),
                hit("Action Jackson", "1988", "tt0094612"),
            ]),
            "Christopher" => Err(AppError::ExternalApi("timeout".to_string())),
            "Leonardo" => Ok(vec![hit("Leonardo", "2021", "tt9999001")]),
            "2010" => Ok(vec![
                hit("2010: The Year We Make Contact", "1984", "tt0086837"),
                hit("2012", "2009", "tt1190080"),
                hit("2010: Moby Dick", "2010", "tt1667355"),
            ]),
            _ => Ok(vec![]),
        }
    }

    fn mock_provider() -> Arc<dyn MovieProvider> {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_search()
            .returning(|query, _| canned_search(query));
        provider.expect_name().return_const("mock");
        Arc::new(provider)
    }

    #[test]
    fn test_plan_searches_for_full_record() {
        let plan = plan_searches(&inception(), 3);
        let summary: Vec<(Strategy, &str, u32)> = plan
            .iter()
            .map(|s| (s.strategy, s.query.as_str(), s.page))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Strategy::Genre, "Action", 3),
                (Strategy::Genre, "Adventure", 3),
                (Strategy::Director, "Christopher", 2),
                (Strategy::Actor, "Leonardo", 2),
                (Strategy::Year, "2010", 2),
            ]
        );
    }

    #[test]
    fn test_plan_searches_skips_sentinel_fields() {
        let movie = MovieRecord {
            title: "Mystery".to_string(),
            genre: "Drama".to_string(),
            ..MovieRecord::default()
        };

        let plan = plan_searches(&movie, 1);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].strategy, Strategy::Genre);
        assert_eq!(plan[0].query, "Drama");
    }

    #[test]
    fn test_plan_searches_skips_large_directing_teams() {
        let movie = MovieRecord {
            director: "Ethan Coen, Joel Coen, Someone Else".to_string(),
            ..inception()
        };

        let plan = plan_searches(&movie, 1);
        assert!(plan.iter().all(|s| s.strategy != Strategy::Director));
    }

    #[test]
    fn test_plan_searches_two_directors_allowed() {
        let movie = MovieRecord {
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            ..inception()
        };

        let plan = plan_searches(&movie, 1);
        let director: Vec<_> = plan
            .iter()
            .filter(|s| s.strategy == Strategy::Director)
            .collect();
        assert_eq!(director.len(), 1);
        assert_eq!(director[0].query, "Lana");
    }

    #[test]
    fn test_plan_searches_requires_numeric_year() {
        let movie = MovieRecord {
            release_year: "2008–2013".to_string(),
            ..inception()
        };

        let plan = plan_searches(&movie, 1);
        assert!(plan.iter().all(|s| s.strategy != Strategy::Year));
    }

    #[tokio::test]
    async fn test_harvest_collects_in_strategy_order() {
        let stubs = harvest(mock_provider(), &inception(), 1, &HashSet::new()).await;

        let titles: Vec<(&str, Strategy)> = stubs
            .iter()
            .map(|s| (s.title.as_str(), s.source))
            .collect();

        assert_eq!(
            titles,
            vec![
                ("Action Jackson", Strategy::Genre),
                ("Adventure Time", Strategy::Genre),
                ("Leonardo", Strategy::Actor),
                ("2012", Strategy::Year),
                ("2010: Moby Dick", Strategy::Year),
            ]
        );
    }

    #[tokio::test]
    async fn test_harvest_drops_original_and_excluded_titles() {
        let exclude: HashSet<String> = ["Adventure Time".to_string()].into_iter().collect();
        let stubs = harvest(mock_provider(), &inception(), 1, &exclude).await;

        assert!(stubs.iter().all(|s| s.title != "Inception"));
        assert!(stubs.iter().all(|s| s.title != "Adventure Time"));
    }

    #[tokio::test]
    async fn test_harvest_year_strategy_filters_window() {
        let stubs = harvest(mock_provider(), &inception(), 1, &HashSet::new()).await;

        assert!(stubs
            .iter()
            .all(|s| s.title != "2010: The Year We Make Contact"));
    }

    #[tokio::test]
    async fn test_harvest_normalizes_missing_poster() {
        let stubs = harvest(mock_provider(), &inception(), 1, &HashSet::new()).await;
        assert!(stubs.iter().all(|s| s.poster_url.is_empty()));
    }

    #[tokio::test]
    async fn test_harvest_survives_every_search_failing() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_search()
            .returning(|_, _| Err(AppError::ExternalApi("down".to_string())));
        let provider: Arc<dyn MovieProvider> = Arc::new(provider);

        let stubs = harvest(provider, &inception(), 1, &HashSet::new()).await;
        assert!(stubs.is_empty());
    }

    #[tokio::test]
    async fn test_harvest_passes_capped_page_to_provider() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);

        let mut provider = MockMovieProvider::new();
        provider.expect_search().times(5).returning(move |query, filter| {
            recorded.lock().unwrap().push((query.to_string(), filter));
            Ok(vec![])
        });
        let provider = Arc::new(provider);

        harvest(provider.clone(), &inception(), 4, &HashSet::new()).await;

        let mut calls = calls.lock().unwrap().clone();
        calls.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            calls,
            vec![
                ("2010".to_string(), SearchFilter::movies(2)),
                ("Action".to_string(), SearchFilter::movies(4)),
                ("Adventure".to_string(), SearchFilter::movies(4)),
                ("Christopher".to_string(), SearchFilter::movies(2)),
                ("Leonardo".to_string(), SearchFilter::movies(2)),
            ]
        );
    }
}
