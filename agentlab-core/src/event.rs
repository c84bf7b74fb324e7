use crate::types::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Event represents a single step in an agent invocation: a model reply,
/// a tool result, or a state update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub invocation_id: String,
    /// Name of the agent (or `"user"`) that produced this event.
    pub author: String,
    pub content: Option<Content>,
    pub actions: EventActions,
}

/// Side effects attached to an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventActions {
    /// Session state keys written by this event.
    pub state_delta: HashMap<String, serde_json::Value>,
    /// Signals the enclosing loop to stop iterating.
    pub escalate: bool,
    /// Skip the post-tool summarization turn and end the agent's run.
    pub skip_summarization: bool,
}

impl Event {
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            invocation_id: invocation_id.into(),
            author: String::new(),
            content: None,
            actions: EventActions::default(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = Event::new("inv-123");
        assert_eq!(event.invocation_id, "inv-123");
        assert!(!event.id.is_empty());
        assert!(event.content.is_none());
    }

    #[test]
    fn test_event_builder() {
        let event = Event::new("inv-1")
            .with_author("writer")
            .with_content(Content::new("model").with_text("draft"));
        assert_eq!(event.author, "writer");
        assert_eq!(event.content.unwrap().text(), "draft");
    }

    #[test]
    fn test_actions_default() {
        let actions = EventActions::default();
        assert!(actions.state_delta.is_empty());
        assert!(!actions.escalate);
        assert!(!actions.skip_summarization);
    }
}
