//! Gemini API client: request building, sending, and response parsing.

use tracing::debug;

use crate::{ChatError, Message, ModelClient, ModelContext, ModelReply, Role, TokenUsage};

use super::chat::GeminiChat;
use super::config::GeminiConfig;

/// Gemini API client.
///
/// Cheap to clone; every open conversation context holds its own copy.
#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_url(&self) -> String {
        format!("{}/{}:generateContent", self.config.api_base, self.config.model)
    }

    /// Build the JSON request body for the Gemini API.
    fn build_request_body(&self, history: &[Message]) -> serde_json::Value {
        let contents: Vec<_> = history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": msg.content }]
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        })
    }

    /// Parse a Gemini response into reply text and token usage.
    ///
    /// Text parts of the first candidate are concatenated; a response
    /// with no candidates is malformed.
    fn parse_response(&self, json: serde_json::Value) -> Result<ModelReply, ChatError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| ChatError::Parse("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| ChatError::Parse("empty candidates".to_string()))?;

        let parts = first["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut text = String::new();
        for part in &parts {
            if let Some(t) = part["text"].as_str() {
                text.push_str(t);
            }
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(ModelReply { text, usage })
    }

    /// Send one `generateContent` request carrying the given history.
    pub(crate) async fn generate(&self, history: &[Message]) -> Result<ModelReply, ChatError> {
        let body = self.build_request_body(history);
        let url = self.api_url();

        debug!(model = %self.config.model, messages = history.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatError::Parse(e.to_string()))?;

        self.parse_response(json)
    }
}

impl ModelClient for GeminiClient {
    fn start_chat(&self) -> Box<dyn ModelContext> {
        Box::new(GeminiChat::new(self.clone()))
    }
}
