use serde::{Deserialize, Serialize};

use super::MovieDetails;

/// Sentinel for any field the provider did not supply
pub const NOT_AVAILABLE: &str = "N/A";

pub const NO_SUMMARY: &str = "No summary available.";

/// Poster shown for a looked-up movie without artwork
pub const MOVIE_POSTER_PLACEHOLDER: &str =
    "https://via.placeholder.com/300x450/667eea/ffffff?text=No+Poster+Available";

/// Normalized movie metadata
///
/// Wire names match what the web client sends back when it asks for
/// further recommendation pages. Missing keys default to the sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    pub title: String,
    #[serde(rename = "poster")]
    pub poster_url: String,
    pub genre: String,
    pub summary: String,
    pub rating: String,
    pub language: String,
    pub runtime: String,
    #[serde(rename = "year")]
    pub release_year: String,
    pub director: String,
    pub actors: String,
    pub box_office: String,
    #[serde(rename = "imdb_id")]
    pub external_id: String,
}

impl Default for MovieRecord {
    fn default() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            poster_url: MOVIE_POSTER_PLACEHOLDER.to_string(),
            genre: NOT_AVAILABLE.to_string(),
            summary: NO_SUMMARY.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            language: NOT_AVAILABLE.to_string(),
            runtime: NOT_AVAILABLE.to_string(),
            release_year: NOT_AVAILABLE.to_string(),
            director: NOT_AVAILABLE.to_string(),
            actors: NOT_AVAILABLE.to_string(),
            box_office: NOT_AVAILABLE.to_string(),
            external_id: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Returns the value unless it is empty or the sentinel
pub fn known(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
        None
    } else {
        Some(trimmed)
    }
}

/// Parses a year string that consists of ASCII digits only
pub fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn or_sentinel(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl MovieRecord {
    /// Numeric rating, read from the `"X/10"` form (a bare number is accepted too)
    pub fn rating_value(&self) -> Option<f64> {
        let raw = self.rating.trim();
        let number = raw.strip_suffix("/10").unwrap_or(raw);
        number.trim().parse::<f64>().ok().filter(|r| r.is_finite())
    }

    pub fn year_value(&self) -> Option<i32> {
        parse_year(&self.release_year)
    }
}

impl From<MovieDetails> for MovieRecord {
    fn from(details: MovieDetails) -> Self {
        let poster_url = details
            .poster
            .filter(|p| known(p).is_some())
            .unwrap_or_else(|| MOVIE_POSTER_PLACEHOLDER.to_string());

        let summary = details
            .plot
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        Self {
            title: or_sentinel(details.title),
            poster_url,
            genre: or_sentinel(details.genre),
            summary,
            rating: format!("{}/10", or_sentinel(details.imdb_rating)),
            language: or_sentinel(details.language),
            runtime: or_sentinel(details.runtime),
            release_year: or_sentinel(details.year),
            director: or_sentinel(details.director),
            actors: or_sentinel(details.actors),
            box_office: or_sentinel(details.box_office),
            external_id: or_sentinel(details.imdb_id),
        }
    }
}

/// A movie as returned to a signed-in user
#[derive(Debug, Clone, Serialize)]
pub struct MovieView {
    #[serde(flatten)]
    pub movie: MovieRecord,
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception_details() -> MovieDetails {
        MovieDetails {
            response: "True".to_string(),
            title: Some("Inception".to_string()),
            year: Some("2010".to_string()),
            genre: Some("Action, Adventure, Sci-Fi".to_string()),
            plot: Some("A thief who steals corporate secrets.".to_string()),
            poster: Some("https://m.media-amazon.com/inception.jpg".to_string()),
            imdb_rating: Some("8.8".to_string()),
            language: Some("English, Japanese, French".to_string()),
            runtime: Some("148 min".to_string()),
            director: Some("Christopher Nolan".to_string()),
            actors: Some("Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page".to_string()),
            box_office: Some("$292,587,330".to_string()),
            imdb_id: Some("tt1375666".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_from_complete_details() {
        let record = MovieRecord::from(inception_details());

        assert_eq!(record.title, "Inception");
        assert_eq!(record.rating, "8.8/10");
        assert_eq!(record.release_year, "2010");
        assert_eq!(record.external_id, "tt1375666");
        assert_eq!(record.poster_url, "https://m.media-amazon.com/inception.jpg");
        assert_eq!(record.rating_value(), Some(8.8));
        assert_eq!(record.year_value(), Some(2010));
    }

    #[test]
    fn test_record_from_sparse_details_uses_sentinels() {
        let details = MovieDetails {
            response: "True".to_string(),
            title: Some("Obscure Film".to_string()),
            poster: Some("N/A".to_string()),
            ..Default::default()
        };

        let record = MovieRecord::from(details);
        assert_eq!(record.poster_url, MOVIE_POSTER_PLACEHOLDER);
        assert_eq!(record.summary, NO_SUMMARY);
        assert_eq!(record.director, NOT_AVAILABLE);
        assert_eq!(record.rating, "N/A/10");
        assert_eq!(record.rating_value(), None);
        assert_eq!(record.year_value(), None);
    }

    #[test]
    fn test_record_serializes_with_client_keys() {
        let record = MovieRecord::from(inception_details());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["poster"], "https://m.media-amazon.com/inception.jpg");
        assert_eq!(json["year"], "2010");
        assert_eq!(json["imdb_id"], "tt1375666");
        assert!(json.get("poster_url").is_none());
    }

    #[test]
    fn test_record_deserializes_partial_client_payload() {
        let json = r#"{"title": "Inception", "genre": "Action, Sci-Fi", "year": "2010"}"#;

        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Inception");
        assert_eq!(record.release_year, "2010");
        assert_eq!(record.director, NOT_AVAILABLE);
        assert_eq!(record.actors, NOT_AVAILABLE);
    }

    #[test]
    fn test_parse_year_rejects_ranges() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("2008–2013"), None);
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_known() {
        assert_eq!(known("Christopher Nolan"), Some("Christopher Nolan"));
        assert_eq!(known("N/A"), None);
        assert_eq!(known("  "), None);
    }

    #[test]
    fn test_movie_view_flattens_record() {
        let view = MovieView {
            movie: MovieRecord::from(inception_details()),
            is_favorite: true,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "Inception");
        assert_eq!(json["is_favorite"], true);
    }
}
