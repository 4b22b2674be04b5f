//! Stateful Gemini conversation context.

use async_trait::async_trait;

use crate::{ChatError, Message, ModelContext, ModelReply};

use super::client::GeminiClient;

/// One Gemini conversation.
///
/// Carries the prior turns and replays them on the wire each call, so
/// callers transmit only the new utterance. A failed call commits
/// nothing: the history reads as if the turn had never been attempted.
pub struct GeminiChat {
    client: GeminiClient,
    history: Vec<Message>,
}

impl GeminiChat {
    pub(crate) fn new(client: GeminiClient) -> Self {
        Self {
            client,
            history: Vec::new(),
        }
    }

    /// Completed turns accumulated so far, as user/model pairs.
    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

#[async_trait]
impl ModelContext for GeminiChat {
    async fn send(&mut self, utterance: &str) -> Result<ModelReply, ChatError> {
        let mut outgoing = self.history.clone();
        outgoing.push(Message::user(utterance));

        let reply = self.client.generate(&outgoing).await?;

        self.history = outgoing;
        self.history.push(Message::assistant(reply.text.clone()));
        Ok(reply)
    }
}
