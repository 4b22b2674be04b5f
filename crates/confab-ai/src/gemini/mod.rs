//! Google Gemini API client.
//!
//! Talks to the Generative Language API. The API keeps no conversation
//! state server-side, so `GeminiChat` carries prior turns client-side
//! and replays them on each call.

mod chat;
mod client;
mod config;

pub use chat::GeminiChat;
pub use client::GeminiClient;
pub use config::GeminiConfig;
