//! Conversational core for Confab.
//!
//! Provides the Gemini API client and the session manager that drives
//! the turn-by-turn exchange:
//! - Stateful conversation contexts (prior turns replayed per call)
//! - An ordered message log with explicit reset
//! - Remote failures converted to turn outcomes, never propagated

pub mod gemini;
pub mod session;

use async_trait::async_trait;

pub use gemini::{GeminiChat, GeminiClient, GeminiConfig};
pub use session::{Chat, Session, TurnOutcome};

/// A client capable of opening conversation contexts with a remote model.
pub trait ModelClient: Send + Sync {
    /// Open a fresh conversation context with no prior turns.
    fn start_chat(&self) -> Box<dyn ModelContext>;
}

/// A stateful conversation context with a remote model.
///
/// The context retains prior turns, so callers transmit only the new
/// utterance each call.
#[async_trait]
pub trait ModelContext: Send {
    async fn send(&mut self, utterance: &str) -> Result<ModelReply, ChatError>;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One reply from the remote model.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub text: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Errors from a remote model call.
///
/// Recoverable at the turn level: the session stays usable and the
/// caller may re-submit the same utterance.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API error: {0}")]
    Api(String),
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Startup configuration errors. Fatal: checked once before any
/// session is created.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set; add it to the environment or a .env file")]
    MissingApiKey,
}
