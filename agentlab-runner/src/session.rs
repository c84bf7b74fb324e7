use agentlab_core::{Error, Result, Session};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Process-local session store.
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

fn key(app_name: &str, user_id: &str, session_id: &str) -> String {
    format!("{app_name}:{user_id}:{session_id}")
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session with a fresh id.
    pub fn create_session(&self, app_name: &str, user_id: &str) -> Arc<Session> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(app_name, user_id, &id));
        self.sessions
            .write()
            .unwrap()
            .insert(key(app_name, user_id, &id), session.clone());
        session
    }

    pub fn session(&self, app_name: &str, user_id: &str, session_id: &str) -> Result<Arc<Session>> {
        self.sessions
            .read()
            .unwrap()
            .get(&key(app_name, user_id, session_id))
            .cloned()
            .ok_or_else(|| {
                Error::Session(format!(
                    "session '{session_id}' not found for user '{user_id}'"
                ))
            })
    }

    pub fn delete_session(&self, app_name: &str, user_id: &str, session_id: &str) {
        self.sessions
            .write()
            .unwrap()
            .remove(&key(app_name, user_id, session_id));
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_look_up() {
        let service = InMemorySessionService::new();
        let session = service.create_session("app", "user1");
        let found = service.session("app", "user1", session.id()).unwrap();
        assert_eq!(found.id(), session.id());
    }

    #[test]
    fn test_missing_session_errors() {
        let service = InMemorySessionService::new();
        let err = service.session("app", "user1", "nope").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_delete() {
        let service = InMemorySessionService::new();
        let session = service.create_session("app", "user1");
        service.delete_session("app", "user1", session.id());
        assert!(service.session("app", "user1", session.id()).is_err());
    }
}
