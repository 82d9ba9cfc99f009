//! Conversation turn types
//!
//! A conversation is an append-only ordered sequence of turns. The rolling
//! context summary consumed by the classifier is derived fresh each turn and
//! is never stored here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Optional metadata attached to an assistant turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnMetadata {
    /// Tool that produced the turn, if any
    pub tool_used: Option<String>,
    /// Structured payload (booking details, plan info)
    pub payload: Option<Value>,
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TurnMetadata>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            metadata: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: TurnMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Append-only conversation history owned by a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ConversationTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Last `n` turns, oldest first
    pub fn last_n(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }
}

impl FromIterator<ConversationTurn> for ChatHistory {
    fn from_iter<I: IntoIterator<Item = ConversationTurn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_n_window() {
        let mut history = ChatHistory::new();
        for i in 0..8 {
            history.push(ConversationTurn::user(format!("turn {i}")));
        }

        let window = history.last_n(5);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].text, "turn 3");
        assert_eq!(window[4].text, "turn 7");
    }

    #[test]
    fn test_last_n_shorter_than_window() {
        let mut history = ChatHistory::new();
        history.push(ConversationTurn::user("hello"));

        assert_eq!(history.last_n(5).len(), 1);
        assert!(ChatHistory::new().last_n(5).is_empty());
    }
}
