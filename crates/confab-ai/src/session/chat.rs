//! Turn coordination: one request/response cycle per submitted utterance.

use tracing::{debug, warn};

use crate::{Message, ModelClient, ModelContext as _, Session};

/// Result of one submitted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model answered; the reply text is also appended to the log.
    Success(String),
    /// The remote call failed. The user's message stays recorded and
    /// no assistant message was added, so the caller may re-submit.
    Failure(String),
}

impl TurnOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TurnOutcome::Success(_))
    }
}

/// Drives the request/response cycle against a single live session.
///
/// Callers must observe each `submit` outcome before submitting again,
/// and must not `reset` while a `submit` is in flight. Within that
/// contract no locking is needed: the remote call is the sole await
/// point and nothing else touches the session during it.
pub struct Chat {
    session: Session,
}

impl Chat {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Submit one user utterance and await the model's reply.
    ///
    /// The user message is recorded unconditionally: the transcript
    /// shows what was asked even when no answer was produced. Only the
    /// new utterance goes over the wire; the conversation context
    /// carries the prior turns.
    pub async fn submit(
        &mut self,
        client: &dyn ModelClient,
        utterance: impl Into<String>,
    ) -> TurnOutcome {
        let utterance = utterance.into();
        self.session.push(Message::user(utterance.clone()));

        let result = self
            .session
            .ensure_context(|| client.start_chat())
            .send(&utterance)
            .await;

        match result {
            Ok(reply) => {
                debug!(
                    input_tokens = reply.usage.input_tokens,
                    output_tokens = reply.usage.output_tokens,
                    "turn completed"
                );
                self.session.push(Message::assistant(reply.text.clone()));
                TurnOutcome::Success(reply.text)
            }
            Err(e) => {
                warn!(error = %e, "turn failed");
                TurnOutcome::Failure(e.to_string())
            }
        }
    }

    /// Discard the session. The next `submit` starts a fresh one with
    /// a brand-new conversation context.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// The conversation transcript in turn order.
    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::{ChatError, ModelContext, ModelReply, Role, TokenUsage};

    /// Context double that pops one scripted result per send and
    /// records what was transmitted.
    struct ScriptedContext {
        script: Arc<Mutex<VecDeque<Result<String, ChatError>>>>,
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ModelContext for ScriptedContext {
        async fn send(&mut self, utterance: &str) -> Result<ModelReply, ChatError> {
            self.sent.lock().unwrap().push(utterance.to_string());
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(ModelReply {
                    text,
                    usage: TokenUsage::default(),
                }),
                Some(Err(e)) => Err(e),
                None => Err(ChatError::Api("script exhausted".into())),
            }
        }
    }

    /// Client double that counts the contexts it opens.
    struct ScriptedClient {
        script: Arc<Mutex<VecDeque<Result<String, ChatError>>>>,
        sent: Arc<Mutex<Vec<String>>>,
        created: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<String, ChatError>>) -> Self {
            Self {
                script: Arc::new(Mutex::new(script.into_iter().collect())),
                sent: Arc::new(Mutex::new(Vec::new())),
                created: AtomicUsize::new(0),
            }
        }

        fn contexts_created(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }

        fn transmitted(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ModelClient for ScriptedClient {
        fn start_chat(&self) -> Box<dyn ModelContext> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Box::new(ScriptedContext {
                script: Arc::clone(&self.script),
                sent: Arc::clone(&self.sent),
            })
        }
    }

    fn roles(chat: &Chat) -> Vec<Role> {
        chat.messages().iter().map(|m| m.role).collect()
    }

    #[tokio::test]
    async fn successful_submit_appends_user_then_assistant() {
        let client = ScriptedClient::new(vec![Ok("Hi there".into())]);
        let mut chat = Chat::new();

        let outcome = chat.submit(&client, "Hello").await;

        assert_eq!(outcome, TurnOutcome::Success("Hi there".into()));
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[0].role, Role::User);
        assert_eq!(chat.messages()[0].content, "Hello");
        assert_eq!(chat.messages()[1].role, Role::Assistant);
        assert_eq!(chat.messages()[1].content, "Hi there");
    }

    #[tokio::test]
    async fn transcript_alternates_over_successful_submits() {
        let client = ScriptedClient::new(vec![Ok("a".into()), Ok("b".into()), Ok("c".into())]);
        let mut chat = Chat::new();

        for utterance in ["one", "two", "three"] {
            assert!(chat.submit(&client, utterance).await.is_success());
        }

        assert_eq!(chat.messages().len(), 6);
        assert_eq!(
            roles(&chat),
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
            ]
        );
        assert_eq!(chat.messages()[4].content, "three");
        assert_eq!(chat.messages()[5].content, "c");
    }

    #[tokio::test]
    async fn failed_submit_keeps_only_the_user_message() {
        let client = ScriptedClient::new(vec![
            Err(ChatError::Network("timeout".into())),
            Ok("Hi".into()),
        ]);
        let mut chat = Chat::new();

        let outcome = chat.submit(&client, "Hello").await;
        assert_eq!(outcome, TurnOutcome::Failure("network error: timeout".into()));
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::User);

        // Re-submitting the same utterance works and preserves history
        let outcome = chat.submit(&client, "Hello").await;
        assert_eq!(outcome, TurnOutcome::Success("Hi".into()));
        assert_eq!(roles(&chat), vec![Role::User, Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn failure_description_names_the_error() {
        let client = ScriptedClient::new(vec![Err(ChatError::RateLimited)]);
        let mut chat = Chat::new();

        let outcome = chat.submit(&client, "Hello").await;
        assert_eq!(outcome, TurnOutcome::Failure("rate limited".into()));
    }

    #[tokio::test]
    async fn context_is_created_lazily_and_reused_across_turns() {
        let client = ScriptedClient::new(vec![Ok("a".into()), Ok("b".into())]);
        let mut chat = Chat::new();
        assert_eq!(client.contexts_created(), 0);

        chat.submit(&client, "one").await;
        assert_eq!(client.contexts_created(), 1);

        chat.submit(&client, "two").await;
        assert_eq!(client.contexts_created(), 1);

        // Only the new utterance crosses the seam each turn
        assert_eq!(client.transmitted(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn reset_empties_the_log_and_forces_a_fresh_context() {
        let client = ScriptedClient::new(vec![Ok("a".into()), Ok("b".into())]);
        let mut chat = Chat::new();

        chat.submit(&client, "one").await;
        assert_eq!(chat.messages().len(), 2);

        chat.reset();
        assert!(chat.messages().is_empty());
        assert_eq!(client.contexts_created(), 1);

        chat.submit(&client, "two").await;
        assert_eq!(client.contexts_created(), 2);
        assert_eq!(chat.messages().len(), 2);
    }
}
