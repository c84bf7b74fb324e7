use agentlab_core::{Agent, EventStream, InvocationContext, Result};
use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

/// Runs sub-agents one after another against the shared session. Each
/// stage's `output_key` write is visible to the next stage's instruction
/// template. An escalating event stops the pipeline.
pub struct SequentialAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl SequentialAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sub_agents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[async_trait]
impl Agent for SequentialAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn sub_agents(&self) -> &[Arc<dyn Agent>] {
        &self.sub_agents
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let name = self.name.clone();
        let sub_agents = self.sub_agents.clone();

        let s = stream! {
            for agent in sub_agents {
                tracing::debug!(pipeline = %name, stage = %agent.name(), "running stage");
                let mut events = match agent.run(ctx.clone()).await {
                    Ok(events) => events,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };
                while let Some(event) = events.next().await {
                    match event {
                        Ok(event) => {
                            let escalated = event.actions.escalate;
                            yield Ok(event);
                            if escalated {
                                return;
                            }
                        }
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }
        };
        Ok(Box::pin(s))
    }
}
