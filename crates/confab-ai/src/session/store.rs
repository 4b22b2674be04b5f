//! Session state: the message log and the conversation context handle.

use crate::{Message, ModelContext};

/// One conversation session.
///
/// Owns the authoritative message sequence and the context handle to
/// the remote model. The context exists iff a turn has been initiated
/// since the last reset; it is created lazily through
/// [`Session::ensure_context`] and nothing else may hold it.
pub struct Session {
    messages: Vec<Message>,
    context: Option<Box<dyn ModelContext>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            context: None,
        }
    }

    /// Append a message at the tail of the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The message sequence in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether a context has been created since the last reset.
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Return the conversation context, creating it on first use.
    ///
    /// The factory runs at most once per session lifetime; every later
    /// call returns the stored handle untouched.
    pub fn ensure_context(
        &mut self,
        factory: impl FnOnce() -> Box<dyn ModelContext>,
    ) -> &mut dyn ModelContext {
        self.context.get_or_insert_with(factory).as_mut()
    }

    /// Replace the session with a fresh empty one.
    ///
    /// The message log and the context handle are dropped together; no
    /// partial state survives.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
