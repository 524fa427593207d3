//! Message and chat-history value objects.
//!
//! A session keeps the turns exchanged with the user; the router only ever
//! sees the rendered history string, never the session itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a provider request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// System instructions
    System,
}

/// A single message sent to or received from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }
}

/// One user message and the assistant's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user: String,
    pub assistant: String,
}

/// The ordered turns of one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    pub turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(ChatTurn {
            user: user.into(),
            assistant: assistant.into(),
        });
    }

    /// Render the last `max_turns` turns as the history block the router
    /// embeds in its prompts.
    pub fn render(&self, max_turns: usize) -> String {
        let skip = self.turns.len().saturating_sub(max_turns);
        self.turns[skip..]
            .iter()
            .map(|t| format!("Usuario: {}\nAgente: {}", t.user, t.assistant))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the last `max_turns` turns in the compact form used as a
    /// decision context.
    pub fn render_compact(&self, max_turns: usize) -> String {
        let skip = self.turns.len().saturating_sub(max_turns);
        self.turns[skip..]
            .iter()
            .map(|t| format!("U:{}\nA:{}", t.user, t.assistant))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
