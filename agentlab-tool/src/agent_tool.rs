use agentlab_core::{Agent, Content, Result, Tool, ToolContext};
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;

/// Exposes an agent as a callable tool, letting a coordinator model decide
/// when to delegate to it. The wrapped agent runs against the same session,
/// so its `output_key` writes remain visible to the caller.
pub struct AgentTool {
    agent: Arc<dyn Agent>,
}

impl AgentTool {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }

    fn extract_request(args: &Value) -> String {
        if let Some(request) = args.get("request").and_then(Value::as_str) {
            return request.to_string();
        }
        if let Some(s) = args.as_str() {
            return s.to_string();
        }
        if let Some(object) = args.as_object() {
            for value in object.values() {
                if let Some(s) = value.as_str() {
                    return s.to_string();
                }
            }
        }
        args.to_string()
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "request": {
                    "type": "string",
                    "description": "The request to pass to the agent"
                }
            },
            "required": ["request"]
        }))
    }

    async fn execute(&self, ctx: Arc<ToolContext>, args: Value) -> Result<Value> {
        let request = Self::extract_request(&args);
        let child_ctx = Arc::new(
            ctx.invocation()
                .child(self.agent.name(), Content::new("user").with_text(request)),
        );

        let mut events = self.agent.run(child_ctx).await?;
        let mut last_text = String::new();
        while let Some(event) = events.next().await {
            let event = event?;
            if let Some(content) = event.content {
                let text = content.text();
                if !text.is_empty() {
                    last_text = text;
                }
            }
        }

        Ok(json!({ "response": last_text }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlab_core::{Event, EventStream, InvocationContext, Session};
    use async_stream::stream;

    struct CannedAgent;

    #[async_trait]
    impl Agent for CannedAgent {
        fn name(&self) -> &str {
            "ResearchAgent"
        }

        fn description(&self) -> &str {
            "researches a topic"
        }

        async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
            let invocation_id = ctx.invocation_id().to_string();
            let echo = format!("findings on: {}", ctx.user_content().text());
            let s = stream! {
                yield Ok(Event::new(invocation_id.clone()).with_author("ResearchAgent"));
                yield Ok(Event::new(invocation_id)
                    .with_author("ResearchAgent")
                    .with_content(Content::new("model").with_text(echo)));
            };
            Ok(Box::pin(s))
        }
    }

    fn tool_ctx() -> Arc<ToolContext> {
        let session = Arc::new(Session::new("app", "user1", "s1"));
        let invocation = Arc::new(InvocationContext::new(
            "inv-1",
            "app",
            "user1",
            Content::new("user").with_text("research quantum computing"),
            session,
        ));
        Arc::new(ToolContext::new(invocation, "call-1"))
    }

    #[tokio::test]
    async fn test_runs_agent_and_returns_last_text() {
        let tool = AgentTool::new(Arc::new(CannedAgent));
        assert_eq!(tool.name(), "ResearchAgent");
        let result = tool
            .execute(tool_ctx(), json!({"request": "quantum computing"}))
            .await
            .unwrap();
        assert_eq!(result["response"], "findings on: quantum computing");
    }

    #[test]
    fn test_extract_request_fallbacks() {
        assert_eq!(
            AgentTool::extract_request(&json!({"request": "a"})),
            "a"
        );
        assert_eq!(AgentTool::extract_request(&json!("bare")), "bare");
        assert_eq!(
            AgentTool::extract_request(&json!({"query": "other key"})),
            "other key"
        );
    }
}
