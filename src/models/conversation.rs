use serde::{Deserialize, Serialize};

use super::message::Message;

/// Per-conversation toggles, read at the start of every turn.
/// Mutated only by explicit user gestures, never by the pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub working_language: String,
    pub auto_translate: bool,
    pub symptom_model_enabled: bool,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            working_language: crate::config::DEFAULT_LANGUAGE.to_string(),
            auto_translate: true,
            symptom_model_enabled: true,
        }
    }
}

/// Append-only, single-writer conversation log. Messages are retained for
/// the session and discarded with it; nothing here persists.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
