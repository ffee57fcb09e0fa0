use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Lenient parse of whatever confidence label the AI produced
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

/// Result of identifying a movie from a free-text description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identification {
    /// Most likely title first
    pub movie_titles: Vec<String>,
    pub confidence: Confidence,
    pub needs_clarification: bool,
    pub clarifying_question: String,
}

impl Identification {
    pub fn certain(title: &str) -> Self {
        Self {
            movie_titles: vec![title.to_string()],
            confidence: Confidence::High,
            needs_clarification: false,
            clarifying_question: String::new(),
        }
    }
}

/// The JSON object the AI is asked to reply with
#[derive(Debug, Deserialize)]
pub struct RawIdentification {
    #[serde(default)]
    pub movie_titles: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub needs_clarification: Option<bool>,
    #[serde(default)]
    pub clarifying_question: Option<String>,
}

impl From<RawIdentification> for Identification {
    fn from(raw: RawIdentification) -> Self {
        Self {
            movie_titles: raw
                .movie_titles
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            confidence: raw
                .confidence
                .as_deref()
                .map(Confidence::from_label)
                .unwrap_or_default(),
            needs_clarification: raw.needs_clarification.unwrap_or(false),
            clarifying_question: raw.clarifying_question.unwrap_or_default(),
        }
    }
}
