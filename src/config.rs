use serde::Deserialize;
use std::time::Duration;

const OMDB_KEY_PLACEHOLDER: &str = "your_actual_api_key_here";
const OPENROUTER_KEY_PLACEHOLDER: &str = "your_openrouter_api_key_here";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// OMDb API key
    #[serde(default)]
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// OpenRouter API key; identification falls back to keyword matching without it
    #[serde(default)]
    pub openrouter_api_key: Option<String>,

    /// OpenRouter model used for movie identification
    #[serde(default = "default_openrouter_model")]
    pub openrouter_model: String,

    /// OpenRouter API base URL
    #[serde(default = "default_openrouter_api_url")]
    pub openrouter_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout for each movie provider call, in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Timeout for the AI identification call, in seconds
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,

    /// bcrypt cost factor for stored passwords
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

/// Settings for the AI identification backend
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

fn default_database_url() -> String {
    "sqlite://cinescope.db".to_string()
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_openrouter_model() -> String {
    "openai/gpt-3.5-turbo".to_string()
}

fn default_openrouter_api_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_provider_timeout_secs() -> u64 {
    5
}

fn default_ai_timeout_secs() -> u64 {
    30
}

fn default_password_hash_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            omdb_api_key: String::new(),
            omdb_api_url: default_omdb_api_url(),
            openrouter_api_key: None,
            openrouter_model: default_openrouter_model(),
            openrouter_api_url: default_openrouter_api_url(),
            host: default_host(),
            port: default_port(),
            provider_timeout_secs: default_provider_timeout_secs(),
            ai_timeout_secs: default_ai_timeout_secs(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn is_omdb_configured(&self) -> bool {
        !self.omdb_api_key.trim().is_empty() && self.omdb_api_key != OMDB_KEY_PLACEHOLDER
    }

    /// Returns the AI backend settings, or `None` when no usable key is configured
    pub fn ai_config(&self) -> Option<AiConfig> {
        let api_key = self.openrouter_api_key.as_deref()?.trim();
        if api_key.is_empty() || api_key == OPENROUTER_KEY_PLACEHOLDER {
            return None;
        }

        Some(AiConfig {
            api_key: api_key.to_string(),
            api_url: self.openrouter_api_url.clone(),
            model: self.openrouter_model.clone(),
            timeout: Duration::from_secs(self.ai_timeout_secs),
        })
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_absent_without_key() {
        let config = Config::default();
        assert_eq!(config.ai_config(), None);
    }

    #[test]
    fn test_ai_config_ignores_placeholder_key() {
        let config = Config {
            openrouter_api_key: Some("your_openrouter_api_key_here".to_string()),
            ..Config::default()
        };
        assert_eq!(config.ai_config(), None);
    }

    #[test]
    fn test_ai_config_present_with_key() {
        let config = Config {
            openrouter_api_key: Some("sk-or-test".to_string()),
            ai_timeout_secs: 10,
            ..Config::default()
        };

        let ai = config.ai_config().unwrap();
        assert_eq!(ai.api_key, "sk-or-test");
        assert_eq!(ai.model, "openai/gpt-3.5-turbo");
        assert_eq!(ai.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_omdb_configured() {
        let mut config = Config::default();
        assert!(!config.is_omdb_configured());

        config.omdb_api_key = "your_actual_api_key_here".to_string();
        assert!(!config.is_omdb_configured());

        config.omdb_api_key = "abc123".to_string();
        assert!(config.is_omdb_configured());
    }

    #[test]
    fn test_bind_address() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }
}
