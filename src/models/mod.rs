use serde::Deserialize;

pub mod identification;
pub mod movie;
pub mod recommendation;
pub mod user;

pub use identification::{Confidence, Identification, RawIdentification};
pub use movie::{MovieRecord, MovieView, NOT_AVAILABLE};
pub use recommendation::{
    CandidateStub, EnrichedCandidate, Recommendation, RecommendationPage, Strategy,
};
pub use user::{CurrentUser, Favorite, HistoryEntry, User};

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from the OMDb search endpoint (`?s=`)
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<SearchHit>>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}

/// One entry of an OMDb search result set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

/// Raw response from the OMDb detail endpoint (`?i=`)
///
/// Every field is optional; normalization into [`MovieRecord`] happens once,
/// in `From<MovieDetails> for MovieRecord`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieDetails {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "BoxOffice", default)]
    pub box_office: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}

impl MovieDetails {
    pub fn is_success(&self) -> bool {
        self.response == "True"
    }
}
