use crate::event::EventActions;
use crate::session::Session;
use crate::types::Content;
use std::sync::{Arc, Mutex};

/// Everything an agent needs to handle one invocation: identifiers, the
/// user's input for this turn, and the shared session.
pub struct InvocationContext {
    invocation_id: String,
    app_name: String,
    user_id: String,
    user_content: Content,
    session: Arc<Session>,
}

impl InvocationContext {
    pub fn new(
        invocation_id: impl Into<String>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        user_content: Content,
        session: Arc<Session>,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
            user_content,
            session,
        }
    }

    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_content(&self) -> &Content {
        &self.user_content
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_arc(&self) -> Arc<Session> {
        self.session.clone()
    }

    /// Derive a context for a nested invocation (an agent called as a tool).
    /// The session is shared so nested `output_key` writes stay visible.
    pub fn child(&self, suffix: &str, user_content: Content) -> Self {
        Self {
            invocation_id: format!("{}-{}", self.invocation_id, suffix),
            app_name: self.app_name.clone(),
            user_id: self.user_id.clone(),
            user_content,
            session: self.session.clone(),
        }
    }
}

/// Context handed to a tool while it executes. Tools report side effects
/// (loop escalation, state writes) through the mutable [`EventActions`].
pub struct ToolContext {
    invocation: Arc<InvocationContext>,
    function_call_id: String,
    actions: Mutex<EventActions>,
}

impl ToolContext {
    pub fn new(invocation: Arc<InvocationContext>, function_call_id: impl Into<String>) -> Self {
        Self {
            invocation,
            function_call_id: function_call_id.into(),
            actions: Mutex::new(EventActions::default()),
        }
    }

    pub fn invocation(&self) -> &InvocationContext {
        &self.invocation
    }

    pub fn function_call_id(&self) -> &str {
        &self.function_call_id
    }

    pub fn actions(&self) -> EventActions {
        self.actions.lock().unwrap().clone()
    }

    pub fn set_actions(&self, actions: EventActions) {
        *self.actions.lock().unwrap() = actions;
    }
}
