use crate::domain::services::scoring::{PlatformScorer, RecencyScorer, ReputationEngine};

/// Application configuration, loaded from environment variables with
/// per-field validation. Invalid values are logged and fall back to the
/// defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: [u8; 4],
    pub port: u16,
    /// Feedback generation is enabled only when a key is present.
    pub google_api_key: Option<String>,
    pub text_model: String,
    pub preprompt_path: String,
    pub recency_top_n: usize,
    pub follower_cap: u64,
    pub like_cap: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: [127, 0, 0, 1],
            port: 8000,
            google_api_key: None,
            text_model: "gemini-2.0-flash".to_string(),
            preprompt_path: "preprompt.txt".to_string(),
            recency_top_n: 5,
            follower_cap: 10_000,
            like_cap: 10_000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        let mut config = AppConfig::default();

        if let Ok(port) = std::env::var("APP_PORT") {
            match port.parse::<u16>() {
                Ok(value) if value > 0 => config.port = value,
                _ => {
                    tracing::warn!(
                        "Invalid APP_PORT value: {}, using default: {}",
                        port,
                        config.port
                    );
                }
            }
        }

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            if !key.is_empty() {
                config.google_api_key = Some(key);
            }
        }

        if let Ok(model) = std::env::var("TEXT_PROMPT_MODEL_NAME") {
            if !model.is_empty() {
                config.text_model = model;
            }
        }

        if let Ok(path) = std::env::var("PREPROMPT_FILE_PATH") {
            if !path.is_empty() {
                config.preprompt_path = path;
            }
        }

        if let Ok(top_n) = std::env::var("RECENCY_TOP_N") {
            match top_n.parse::<usize>() {
                Ok(value) if value > 0 => config.recency_top_n = value,
                _ => {
                    tracing::warn!(
                        "Invalid RECENCY_TOP_N value: {}, using default: {}",
                        top_n,
                        config.recency_top_n
                    );
                }
            }
        }

        if let Ok(cap) = std::env::var("FOLLOWER_CAP") {
            match cap.parse::<u64>() {
                Ok(value) if value > 0 => config.follower_cap = value,
                _ => {
                    tracing::warn!(
                        "Invalid FOLLOWER_CAP value: {}, using default: {}",
                        cap,
                        config.follower_cap
                    );
                }
            }
        }

        if let Ok(cap) = std::env::var("LIKE_CAP") {
            match cap.parse::<u64>() {
                Ok(value) if value > 0 => config.like_cap = value,
                _ => {
                    tracing::warn!(
                        "Invalid LIKE_CAP value: {}, using default: {}",
                        cap,
                        config.like_cap
                    );
                }
            }
        }

        config
    }

    /// Build the scoring engine configured by this AppConfig.
    pub fn engine(&self) -> ReputationEngine {
        ReputationEngine::new(PlatformScorer {
            follower_cap: self.follower_cap,
            like_cap: self.like_cap,
            max_post_score: 7.0,
            recency: RecencyScorer {
                top_n: self.recency_top_n,
            },
        })
    }
}
