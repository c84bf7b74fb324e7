use agentlab_core::{Result, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Lets a model break out of a loop agent early by escalating. The loop
/// stops as soon as an event carries the escalate flag.
#[derive(Default)]
pub struct ExitLoopTool;

impl ExitLoopTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ExitLoopTool {
    fn name(&self) -> &str {
        "exit_loop"
    }

    fn description(&self) -> &str {
        "Exits the loop.\nCall this function only when you are instructed to do so."
    }

    async fn execute(&self, ctx: Arc<ToolContext>, _args: Value) -> Result<Value> {
        let mut actions = ctx.actions();
        actions.escalate = true;
        actions.skip_summarization = true;
        ctx.set_actions(actions);
        Ok(json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlab_core::{Content, InvocationContext, Session};

    #[tokio::test]
    async fn test_sets_escalate() {
        let session = Arc::new(Session::new("app", "user1", "s1"));
        let invocation = Arc::new(InvocationContext::new(
            "inv-1",
            "app",
            "user1",
            Content::new("user"),
            session,
        ));
        let ctx = Arc::new(ToolContext::new(invocation, "call-1"));

        let tool = ExitLoopTool::new();
        let result = tool.execute(ctx.clone(), json!({})).await.unwrap();
        assert_eq!(result, json!({}));
        let actions = ctx.actions();
        assert!(actions.escalate);
        assert!(actions.skip_summarization);
    }
}
