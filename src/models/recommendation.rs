use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How a candidate was discovered from the original movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Genre,
    Director,
    Actor,
    Year,
}

impl Strategy {
    /// Priority used when merging candidates; higher wins
    pub fn weight(self) -> u8 {
        match self {
            Strategy::Genre => 4,
            Strategy::Director => 3,
            Strategy::Actor => 2,
            Strategy::Year => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Genre => "genre",
            Strategy::Director => "director",
            Strategy::Actor => "actor",
            Strategy::Year => "year",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unenriched candidate taken straight from a provider search
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStub {
    pub source: Strategy,
    pub title: String,
    pub release_year: String,
    /// Empty when the search hit carried no usable poster
    pub poster_url: String,
    pub external_id: String,
}

/// Candidate with full details and its ranking aids
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandidate {
    pub title: String,
    pub poster_url: String,
    pub release_year: String,
    pub rating: String,
    pub genre: String,
    pub director: String,
    pub external_id: String,
    pub relevance_score: u32,
    pub source: Strategy,
}

/// A recommended movie as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    #[serde(rename = "year")]
    pub release_year: String,
    pub rating: String,
    pub genre: String,
    pub director: String,
    #[serde(rename = "imdb_id")]
    pub external_id: String,
}

impl From<EnrichedCandidate> for Recommendation {
    fn from(candidate: EnrichedCandidate) -> Self {
        Self {
            title: candidate.title,
            poster_url: candidate.poster_url,
            release_year: candidate.release_year,
            rating: candidate.rating,
            genre: candidate.genre,
            director: candidate.director,
            external_id: candidate.external_id,
        }
    }
}

/// One page of recommendations
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationPage {
    pub items: Vec<Recommendation>,
    pub has_more: bool,
}
