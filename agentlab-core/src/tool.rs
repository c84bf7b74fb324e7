use crate::context::ToolContext;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema for the tool's arguments, declared to the model.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    /// True for tools executed inside the model provider itself (such as
    /// search grounding). Built-in tools are forwarded to the provider in
    /// the request instead of being declared as callable functions, and
    /// their `execute` is never invoked locally.
    fn is_builtin(&self) -> bool {
        false
    }

    async fn execute(&self, ctx: Arc<ToolContext>, args: Value) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Content, InvocationContext, Session};
    use serde_json::json;

    struct UpperTool;

    #[async_trait]
    impl Tool for UpperTool {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "uppercases a string"
        }

        async fn execute(&self, _ctx: Arc<ToolContext>, args: Value) -> Result<Value> {
            let input = args["input"].as_str().unwrap_or_default();
            Ok(json!({ "output": input.to_uppercase() }))
        }
    }

    #[tokio::test]
    async fn test_tool_execute() {
        let session = Arc::new(Session::new("app", "user1", "s1"));
        let invocation = Arc::new(InvocationContext::new(
            "inv-1",
            "app",
            "user1",
            Content::new("user"),
            session,
        ));
        let ctx = Arc::new(ToolContext::new(invocation, "call-1"));

        let tool = UpperTool;
        assert!(!tool.is_builtin());
        let result = tool.execute(ctx, json!({"input": "abc"})).await.unwrap();
        assert_eq!(result["output"], "ABC");
    }
}
