use agentlab_core::{Agent, EventStream, InvocationContext, Result};
use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

pub const DEFAULT_LOOP_MAX_ITERATIONS: usize = 1000;

/// Repeats its sub-agents in order until one escalates (for example via
/// the exit_loop tool) or the iteration cap is reached.
pub struct LoopAgent {
    name: String,
    description: String,
    max_iterations: usize,
    sub_agents: Vec<Arc<dyn Agent>>,
}

impl LoopAgent {
    pub fn new(name: impl Into<String>, sub_agents: Vec<Arc<dyn Agent>>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            max_iterations: DEFAULT_LOOP_MAX_ITERATIONS,
            sub_agents,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }
}

#[async_trait]
impl Agent for LoopAgent {
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
        let max_iterations = self.max_iterations;
        let sub_agents = self.sub_agents.clone();

        let s = stream! {
            for iteration in 1..=max_iterations {
                tracing::debug!(loop_agent = %name, iteration, "starting iteration");
                for agent in &sub_agents {
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
            }
        };
        Ok(Box::pin(s))
    }
}
