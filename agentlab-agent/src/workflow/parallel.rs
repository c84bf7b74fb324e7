use agentlab_core::{Agent, EventStream, InvocationContext, Result};
use async_stream::stream;
use async_trait::async_trait;
use futures::stream::select_all;
use futures::StreamExt;
use std::sync::Arc;

/// Runs all sub-agents concurrently and interleaves their events as they
/// arrive. Sub-agents share the session, so their `output_key` writes land
/// in the same state map for a downstream aggregator.
pub struct ParallelAgent {
    name: String,
    description: String,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl ParallelAgent {
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
impl Agent for ParallelAgent {
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
        let sub_agents = self.sub_agents.clone();

        let s = stream! {
            let mut streams = Vec::with_capacity(sub_agents.len());
            for agent in &sub_agents {
                match agent.run(ctx.clone()).await {
                    Ok(events) => streams.push(events),
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
            let mut merged = select_all(streams);
            while let Some(event) = merged.next().await {
                yield event;
            }
        };
        Ok(Box::pin(s))
    }
}
