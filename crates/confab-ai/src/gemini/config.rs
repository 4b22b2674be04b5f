//! Gemini API client configuration.

use crate::ConfigError;

pub(crate) const DEFAULT_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub api_base: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.0-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create config from the `GEMINI_API_KEY` environment variable.
    ///
    /// The value is trimmed; a set-but-empty variable counts as missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = std::env::var("GEMINI_API_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self::new(key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Point the client at a different endpoint (proxies, testing).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}
