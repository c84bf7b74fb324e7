use crate::event::Event;
use crate::types::Content;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// A conversation session: shared key/value state, the conversation
/// transcript, and the raw event log.
///
/// Sessions are shared between agents through an `Arc`, so all accessors
/// take `&self` and guard the interior with locks. Workflow agents rely on
/// this: a sequential pipeline threads one agent's `output_key` into the
/// next agent's `{placeholder}` instruction through the same session.
#[derive(Debug)]
pub struct Session {
    id: String,
    app_name: String,
    user_id: String,
    state: RwLock<HashMap<String, Value>>,
    history: RwLock<Vec<Content>>,
    events: RwLock<Vec<Event>>,
}

impl Session {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
            state: RwLock::new(HashMap::new()),
            history: RwLock::new(Vec::new()),
            events: RwLock::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn state_value(&self, key: &str) -> Option<Value> {
        self.state.read().unwrap().get(key).cloned()
    }

    pub fn set_state_value(&self, key: impl Into<String>, value: Value) {
        self.state.write().unwrap().insert(key.into(), value);
    }

    pub fn state_snapshot(&self) -> HashMap<String, Value> {
        self.state.read().unwrap().clone()
    }

    /// Append a turn to the conversation transcript.
    pub fn append_history(&self, content: Content) {
        self.history.write().unwrap().push(content);
    }

    pub fn history(&self) -> Vec<Content> {
        self.history.read().unwrap().clone()
    }

    /// Record an event in the raw event log.
    pub fn record_event(&self, event: Event) {
        self.events.write().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_roundtrip() {
        let session = Session::new("app", "user1", "s1");
        assert!(session.state_value("topic").is_none());
        session.set_state_value("topic", json!("quantum computing"));
        assert_eq!(session.state_value("topic"), Some(json!("quantum computing")));
    }

    #[test]
    fn test_history_accumulates() {
        let session = Session::new("app", "user1", "s1");
        session.append_history(Content::new("user").with_text("hi"));
        session.append_history(Content::new("model").with_text("hello"));
        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, "model");
    }

    #[test]
    fn test_event_log() {
        let session = Session::new("app", "user1", "s1");
        session.record_event(Event::new("inv-1").with_author("writer"));
        assert_eq!(session.events().len(), 1);
        assert_eq!(session.events()[0].author, "writer");
    }
}
