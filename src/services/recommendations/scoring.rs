use std::collections::HashSet;

use crate::models::{movie::known, MovieRecord};

const GENRE_POINTS: u32 = 20;
const DIRECTOR_POINTS: u32 = 30;
const ACTOR_POINTS: u32 = 10;

/// Maximum release-year distance that still earns proximity points
pub const YEAR_WINDOW: i32 = 5;

/// Points awarded per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub genre: u32,
    pub director: u32,
    pub actor: u32,
    pub year: u32,
    pub rating: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.genre + self.director + self.actor + self.year + self.rating
    }
}

/// Relevance of `candidate` to `original`
pub fn score(original: &MovieRecord, candidate: &MovieRecord) -> u32 {
    breakdown(original, candidate).total()
}

pub fn breakdown(original: &MovieRecord, candidate: &MovieRecord) -> ScoreBreakdown {
    ScoreBreakdown {
        genre: overlap(&original.genre, &candidate.genre) * GENRE_POINTS,
        director: director_points(&original.director, &candidate.director),
        actor: overlap(&original.actors, &candidate.actors) * ACTOR_POINTS,
        year: year_points(original.year_value(), candidate.year_value()),
        rating: rating_points(candidate.rating_value()),
    }
}

/// Lower-cased, trimmed comma-separated terms
///
/// Sentinels and blanks are kept as terms, so two movies both missing a
/// field share that term.
fn terms(list: &str) -> HashSet<String> {
    list.split(',').map(|t| t.trim().to_lowercase()).collect()
}

fn overlap(left: &str, right: &str) -> u32 {
    terms(left).intersection(&terms(right)).count() as u32
}

/// Either of the first two name tokens of the original's primary director
/// appearing anywhere in the candidate's directors
fn director_points(original: &str, candidate: &str) -> u32 {
    let Some(original) = known(original) else {
        return 0;
    };
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return 0;
    }

    let primary = original.split(',').next().unwrap_or_default().to_lowercase();
    let matched = primary
        .split_whitespace()
        .take(2)
        .any(|token| candidate.contains(token));

    if matched {
        DIRECTOR_POINTS
    } else {
        0
    }
}

/// `(6 - diff) * 2` within the window: 12 for the same year down to 2 at five years apart
fn year_points(original: Option<i32>, candidate: Option<i32>) -> u32 {
    match (original, candidate) {
        (Some(o), Some(c)) if o != 0 && c != 0 => {
            let diff = (o - c).abs();
            if diff <= YEAR_WINDOW {
                ((YEAR_WINDOW + 1 - diff) * 2) as u32
            } else {
                0
            }
        }
        _ => 0,
    }
}

fn rating_points(rating: Option<f64>) -> u32 {
    match rating {
        Some(r) if r >= 8.0 => 10,
        Some(r) if r >= 7.0 => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(genre: &str, director: &str, actors: &str, year: &str, rating: &str) -> MovieRecord {
        MovieRecord {
            title: "Test".to_string(),
            genre: genre.to_string(),
            director: director.to_string(),
            actors: actors.to_string(),
            release_year: year.to_string(),
            rating: rating.to_string(),
            ..MovieRecord::default()
        }
    }

    fn year_only(year: &str) -> MovieRecord {
        movie("N/A", "N/A", "N/A", year, "N/A/10")
    }

    fn year_points_between(original: &str, candidate: &str) -> u32 {
        breakdown(&year_only(original), &year_only(candidate)).year
    }

    #[test]
    fn test_year_axis_same_year() {
        assert_eq!(year_points_between("2010", "2010"), 12);
    }

    #[test]
    fn test_year_axis_window_edge() {
        assert_eq!(year_points_between("2010", "2015"), 2);
        assert_eq!(year_points_between("2010", "2005"), 2);
    }

    #[test]
    fn test_year_axis_outside_window() {
        assert_eq!(year_points_between("2010", "2016"), 0);
    }

    #[test]
    fn test_year_axis_malformed() {
        assert_eq!(year_points_between("2010", "2010–2014"), 0);
        assert_eq!(year_points_between("N/A", "2010"), 0);
        assert_eq!(year_points_between("0", "3"), 0);
    }

    #[test]
    fn test_rating_axis() {
        let original = year_only("N/A");
        let rating = |r: &str| breakdown(&original, &movie("N/A", "N/A", "N/A", "N/A", r)).rating;

        assert_eq!(rating("8.5/10"), 10);
        assert_eq!(rating("8.0/10"), 10);
        assert_eq!(rating("7.2/10"), 5);
        assert_eq!(rating("6.9/10"), 0);
        assert_eq!(rating("N/A/10"), 0);
        assert_eq!(rating("great"), 0);
    }

    #[test]
    fn test_genre_overlap_is_case_insensitive() {
        let original = movie("Action, Sci-Fi, Thriller", "N/A", "N/A", "N/A", "N/A");
        let candidate = movie("sci-fi,ACTION , Drama", "N/A", "N/A", "N/A", "N/A");

        assert_eq!(breakdown(&original, &candidate).genre, 40);
    }

    #[test]
    fn test_sentinel_fields_overlap_like_any_term() {
        let scored = breakdown(&MovieRecord::default(), &MovieRecord::default());

        assert_eq!(scored.genre, 20);
        assert_eq!(scored.actor, 10);
        assert_eq!(scored.director, 0);
        assert_eq!(scored.year, 0);
    }

    #[test]
    fn test_blank_fields_overlap() {
        let original = movie("", "N/A", "", "N/A", "N/A");
        let candidate = movie("", "N/A", "", "N/A", "N/A");

        let scored = breakdown(&original, &candidate);
        assert_eq!(scored.genre, 20);
        assert_eq!(scored.actor, 10);
    }

    #[test]
    fn test_actor_overlap() {
        let original = movie(
            "N/A",
            "N/A",
            "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
            "N/A",
            "N/A",
        );
        let candidate = movie(
            "N/A",
            "N/A",
            "Leonardo DiCaprio, Mark Ruffalo, elliot page",
            "N/A",
            "N/A",
        );

        assert_eq!(breakdown(&original, &candidate).actor, 20);
    }

    #[test]
    fn test_director_affinity() {
        let original = movie("N/A", "Christopher Nolan", "N/A", "N/A", "N/A");

        let same = movie("N/A", "Christopher Nolan", "N/A", "N/A", "N/A");
        assert_eq!(breakdown(&original, &same).director, 30);

        let partial = movie("N/A", "Jonathan Nolan, Lisa Joy", "N/A", "N/A", "N/A");
        assert_eq!(breakdown(&original, &partial).director, 30);

        let other = movie("N/A", "Denis Villeneuve", "N/A", "N/A", "N/A");
        assert_eq!(breakdown(&original, &other).director, 0);
    }

    #[test]
    fn test_director_unknown_original_scores_zero() {
        let original = movie("N/A", "N/A", "N/A", "N/A", "N/A");
        let candidate = movie("N/A", "Christopher Nolan", "N/A", "N/A", "N/A");

        assert_eq!(breakdown(&original, &candidate).director, 0);
    }

    #[test]
    fn test_full_score_is_deterministic() {
        let original = movie(
            "Action, Adventure, Sci-Fi",
            "Christopher Nolan",
            "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "2010",
            "8.8/10",
        );
        let candidate = movie(
            "Adventure, Drama, Sci-Fi",
            "Christopher Nolan",
            "Matthew McConaughey, Anne Hathaway",
            "2014",
            "8.7/10",
        );

        let expected = ScoreBreakdown {
            genre: 40,
            director: 30,
            actor: 0,
            year: 4,
            rating: 10,
        };
        assert_eq!(breakdown(&original, &candidate), expected);
        assert_eq!(score(&original, &candidate), 84);
        assert_eq!(score(&original, &candidate), score(&original, &candidate));
    }
}
