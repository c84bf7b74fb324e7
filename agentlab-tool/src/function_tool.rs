use agentlab_core::{Result, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type Handler = Box<
    dyn Fn(Arc<ToolContext>, Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// A tool backed by an async closure.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters_schema: Option<Value>,
    handler: Handler,
}

impl FunctionTool {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(Arc<ToolContext>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema: None,
            handler: Box::new(move |ctx, args| Box::pin(handler(ctx, args))),
        }
    }

    pub fn with_parameters_schema(mut self, schema: Value) -> Self {
        self.parameters_schema = Some(schema);
        self
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Option<Value> {
        self.parameters_schema.clone()
    }

    async fn execute(&self, ctx: Arc<ToolContext>, args: Value) -> Result<Value> {
        (self.handler)(ctx, args).await
    }
}
