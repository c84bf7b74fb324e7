use crate::session::InMemorySessionService;
use agentlab_core::{Agent, Content, Event, EventStream, InvocationContext, Result};
use async_stream::stream;
use futures::StreamExt;
use std::sync::Arc;
use uuid::Uuid;

pub struct RunnerConfig {
    pub app_name: String,
    pub agent: Arc<dyn Agent>,
    pub session_service: Arc<InMemorySessionService>,
}

/// Drives one agent against stored sessions.
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run one invocation. The user content is appended to the session
    /// transcript, the agent's events are streamed back, and every event
    /// is recorded in the session's event log.
    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        user_content: Content,
    ) -> Result<EventStream> {
        let session =
            self.config
                .session_service
                .session(&self.config.app_name, user_id, session_id)?;

        let invocation_id = format!("inv-{}", Uuid::new_v4());
        tracing::debug!(
            agent = %self.config.agent.name(),
            %invocation_id,
            session_id,
            "starting invocation"
        );

        session.append_history(user_content.clone());
        session.record_event(
            Event::new(&invocation_id)
                .with_author("user")
                .with_content(user_content.clone()),
        );

        let ctx = Arc::new(InvocationContext::new(
            &invocation_id,
            &self.config.app_name,
            user_id,
            user_content,
            session.clone(),
        ));

        let mut events = self.config.agent.run(ctx).await?;
        let s = stream! {
            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => {
                        session.record_event(event.clone());
                        yield Ok(event);
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        };
        Ok(Box::pin(s))
    }

    /// Convenience wrapper: send a text prompt and collect all events.
    pub async fn run_collect(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<Vec<Event>> {
        let content = Content::new("user").with_text(prompt);
        let mut events = self.run(user_id, session_id, content).await?;
        let mut collected = Vec::new();
        while let Some(event) = events.next().await {
            collected.push(event?);
        }
        Ok(collected)
    }
}
