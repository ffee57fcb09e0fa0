//! Director chat: turns a free-text movie description into a chat reply
//!
//! Identification supplies candidate titles; the first three are looked up
//! through the movie provider and the reply shape depends on how many of
//! them resolve.

use serde::Serialize;

use crate::{
    db::Repository,
    error::AppResult,
    models::{Confidence, CurrentUser, MovieRecord, MovieView},
    services::{identification::MovieIdentifier, providers::MovieProvider, title_search},
};

const MAX_LOOKUPS: usize = 3;

const DEFAULT_CLARIFYING_QUESTION: &str =
    "Could you provide more details to help me identify the movie?";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatReply {
    Text {
        message: String,
        suggestions: Vec<Suggestion>,
    },
    MovieFound {
        message: String,
        movie: MovieView,
        confidence: Confidence,
    },
    MultipleMovies {
        message: String,
        movies: Vec<MovieView>,
        confidence: Confidence,
    },
    Suggestions {
        message: String,
        suggestions: Vec<Suggestion>,
        confidence: Confidence,
    },
}

impl ChatReply {
    fn text(message: impl Into<String>) -> Self {
        ChatReply::Text {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }
}

fn unidentified_message(ai_enabled: bool) -> String {
    let mut message = String::from(
        "I'm having trouble identifying that movie based on the description. \
         Could you provide more details? For example: What genre is it? \
         What year was it released? Any specific actors or scenes you remember?",
    );
    if !ai_enabled {
        message.push_str(
            " (Using basic keyword matching - configure OPENROUTER_API_KEY for better results)",
        );
    }
    message
}

async fn with_favorite(
    repo: &Repository,
    user: &CurrentUser,
    movie: MovieRecord,
) -> AppResult<MovieView> {
    let is_favorite = repo.is_favorite(user.user_id, &movie.external_id).await?;
    Ok(MovieView { movie, is_favorite })
}

/// Answers one chat message
pub async fn respond(
    identifier: &MovieIdentifier,
    provider: &dyn MovieProvider,
    repo: &Repository,
    user: &CurrentUser,
    message: &str,
) -> AppResult<ChatReply> {
    let Some(identification) = identifier.identify(message).await else {
        return Ok(ChatReply::text(unidentified_message(
            identifier.is_ai_enabled(),
        )));
    };

    if identification.needs_clarification {
        let question = if identification.clarifying_question.trim().is_empty() {
            DEFAULT_CLARIFYING_QUESTION.to_string()
        } else {
            identification.clarifying_question
        };
        return Ok(ChatReply::text(question));
    }

    let confidence = identification.confidence;
    let titles = identification.movie_titles;

    let mut found = Vec::new();
    for title in titles.iter().take(MAX_LOOKUPS) {
        if let Some(movie) = title_search::fetch_by_title(provider, title).await {
            found.push(with_favorite(repo, user, movie).await?);
        }
    }

    tracing::info!(
        user_id = user.user_id,
        candidates = titles.len(),
        found = found.len(),
        confidence = ?confidence,
        "Director chat answered"
    );

    let reply = match found.len() {
        0 => ChatReply::Suggestions {
            message: format!(
                "Based on your description, you might be looking for one of these movies: {}. \
                 However, I couldn't find detailed information in our database. \
                 Would you like to search for one of these titles?",
                titles.join(", ")
            ),
            suggestions: titles
                .into_iter()
                .map(|title| Suggestion {
                    title,
                    action: "search".to_string(),
                })
                .collect(),
            confidence,
        },
        1 => {
            let movie = found.remove(0);
            if user.save_history {
                repo.add_history(user.user_id, &movie.movie.title).await?;
            }
            ChatReply::MovieFound {
                message: format!(
                    "🎬 I believe you're looking for **{}**! Here are the details:",
                    movie.movie.title
                ),
                movie,
                confidence,
            }
        }
        count => ChatReply::MultipleMovies {
            message: format!(
                "I found {} possible matches based on your description. Here they are:",
                count
            ),
            movies: found,
            confidence,
        },
    };

    Ok(reply)
}
