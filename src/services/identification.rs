//! Movie identification from free-text descriptions
//!
//! With an AI backend configured, the description goes to an OpenRouter chat
//! model that replies with a JSON verdict. Without one, or whenever the AI
//! call fails, a small keyword table covers a handful of well-known titles.

use regex::Regex;
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::{
    config::AiConfig,
    error::{AppError, AppResult},
    models::{Confidence, Identification, RawIdentification},
};

const SYSTEM_PROMPT: &str =
    "You are a professional movie identification assistant. Always respond with valid JSON only.";

const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 500;

const SCRAPED_TITLE_LIMIT: usize = 3;
const SCRAPE_STOPWORDS: [&str; 6] = ["JSON", "THE", "AND", "FOR", "ARE", "NOT"];

fn user_prompt(description: &str) -> String {
    format!(
        r#"You are a professional movie identification assistant. A user is describing a movie they remember but can't recall the title.

User's description: "{description}"

Based on this description, identify the most likely movie title(s). Consider:
- Plot elements, storylines, themes
- Character names, actor names mentioned
- Settings, time periods, locations
- Genre, tone, style
- Any specific scenes or plot points mentioned

Important rules:
1. Return ONLY a JSON object with this exact format:
   {{
     "movie_titles": ["Most Likely Title 1", "Possible Title 2", "Possible Title 3"],
     "confidence": "high/medium/low",
     "needs_clarification": false,
     "clarifying_question": ""
   }}

2. If you're very confident (80%+), return the most likely title with confidence "high"
3. If you have 2-3 strong candidates, list them all with confidence "medium"
4. If the description is vague or unclear, set needs_clarification to true and provide a helpful question
5. Always include at least one movie title even if confidence is low - make your best guess
6. Movie titles should be exact and properly capitalized
7. Focus on the most recent or popular match if multiple exist

Examples:
- "futuristic Indian movie Prabhas bounty hunter post-apocalyptic" → "KALKI 2898 AD" (high confidence)
- "time travel movie with a red phone booth" → "About Time" or "The Lake House" (medium confidence)
- "a movie with cars" → needs clarification (too vague)

Now analyze the description and respond with ONLY the JSON object, no additional text:"#
    )
}

/// Identifies movies from descriptions
///
/// Whether the AI backend is used is fixed at construction.
#[derive(Clone)]
pub struct MovieIdentifier {
    http_client: HttpClient,
    ai: Option<AiConfig>,
}

impl MovieIdentifier {
    pub fn new(ai: Option<AiConfig>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(ai) = &ai {
            builder = builder.timeout(ai.timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            ai,
        })
    }

    /// Keyword matching only
    pub fn keyword_only() -> Self {
        Self {
            http_client: HttpClient::new(),
            ai: None,
        }
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    /// Returns `None` when the description could not be matched to anything
    pub async fn identify(&self, description: &str) -> Option<Identification> {
        let Some(ai) = &self.ai else {
            return identify_by_keywords(description);
        };

        let reply = match self.ask_ai(ai, description).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, model = %ai.model, "AI identification failed, using keyword fallback");
                return identify_by_keywords(description);
            }
        };

        match parse_ai_reply(&reply) {
            Some(identification) => {
                tracing::info!(
                    titles = ?identification.movie_titles,
                    confidence = ?identification.confidence,
                    "AI identification completed"
                );
                Some(identification)
            }
            None => {
                tracing::warn!(reply = %reply, "AI reply was not valid JSON");
                scrape_identification(&reply).or_else(|| identify_by_keywords(description))
            }
        }
    }

    async fn ask_ai(&self, ai: &AiConfig, description: &str) -> AppResult<String> {
        let payload = json!({
            "model": ai.model,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_prompt(description)
                }
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS
        });

        let url = format!("{}/chat/completions", ai.api_url.trim_end_matches('/'));
        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", ai.api_key))
            .header("HTTP-Referer", "https://cinescope-app.local")
            .header("X-Title", "CineScope DIRECTOR AI")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenRouter returned status {}: {}",
                status, body
            )));
        }

        let response_json: Value = response.json().await?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::ExternalApi("Invalid response format from LLM".to_string()))?;

        Ok(content.trim().to_string())
    }
}

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"```(?:json)?\s*").ok())
        .as_ref()
}

fn candidate_regex() -> Option<&'static Regex> {
    static CANDIDATE: OnceLock<Option<Regex>> = OnceLock::new();
    CANDIDATE
        .get_or_init(|| Regex::new(r#""([^"]+)"|([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)"#).ok())
        .as_ref()
}

/// Removes markdown code fences around a reply
fn strip_code_fences(reply: &str) -> String {
    match fence_regex() {
        Some(fence) => fence.replace_all(reply, "").trim().to_string(),
        None => reply.trim().to_string(),
    }
}

/// Parses the AI reply, falling back to the outermost `{...}` span
pub fn parse_ai_reply(reply: &str) -> Option<Identification> {
    let cleaned = strip_code_fences(reply);

    if let Ok(raw) = serde_json::from_str::<RawIdentification>(&cleaned) {
        return Some(raw.into());
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str::<RawIdentification>(&cleaned[start..=end])
        .ok()
        .map(Identification::from)
}

/// Pulls likely titles out of a free-text reply
///
/// Looks at the first three quoted strings or runs of Capitalized Words and
/// keeps those that are not too short or a stopword.
pub fn scrape_titles(reply: &str) -> Vec<String> {
    let Some(candidate) = candidate_regex() else {
        return Vec::new();
    };

    candidate
        .captures_iter(reply)
        .take(SCRAPED_TITLE_LIMIT)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .filter(|title| {
            title.chars().count() > 3 && !SCRAPE_STOPWORDS.contains(&title.to_uppercase().as_str())
        })
        .collect()
}

/// Medium-confidence guess from a reply that was not valid JSON
///
/// Fences are stripped first so scraping sees the same text the JSON parse did.
pub fn scrape_identification(reply: &str) -> Option<Identification> {
    let titles = scrape_titles(&strip_code_fences(reply));
    if titles.is_empty() {
        return None;
    }

    Some(Identification {
        movie_titles: titles,
        confidence: Confidence::Medium,
        needs_clarification: false,
        clarifying_question: String::new(),
    })
}

/// A title and the keyword combinations that identify it; any one
/// combination matching in full is enough
struct KeywordRule {
    title: &'static str,
    any_of: &'static [&'static [&'static str]],
}

/// Checked in order, first match wins
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        title: "Titanic",
        any_of: &[&["JACK", "ROSE", "SHIP"], &["TITANIC"], &["ICEBERG", "SHIP", "SINK"]],
    },
    KeywordRule {
        title: "KALKI 2898 AD",
        any_of: &[&["KALKI"], &["2898"], &["PRABHAS", "BOUNTY"]],
    },
    KeywordRule {
        title: "Inception",
        any_of: &[&["INCEPTION"], &["DREAM", "DIVE"], &["DREAM", "LAYER"]],
    },
    KeywordRule {
        title: "Avatar",
        any_of: &[&["AVATAR", "BLUE"], &["AVATAR", "PANDORA"]],
    },
    KeywordRule {
        title: "The Matrix",
        any_of: &[&["MATRIX"], &["RED", "PILL", "BLUE"]],
    },
    KeywordRule {
        title: "Interstellar",
        any_of: &[&["INTERSTELLAR"], &["SPACE", "TIME", "DILATION"]],
    },
];

/// Deterministic identification for a fixed set of well-known titles
pub fn identify_by_keywords(description: &str) -> Option<Identification> {
    let upper = description.to_uppercase();

    KEYWORD_RULES
        .iter()
        .find(|rule| {
            rule.any_of
                .iter()
                .any(|keywords| keywords.iter().all(|k| upper.contains(k)))
        })
        .map(|rule| Identification::certain(rule.title))
}
