use agentlab_core::{Error, Result, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Marker tool enabling Gemini's built-in web search grounding. Attaching
/// it to an agent turns on the `googleSearch` tool in the request; the
/// search itself runs inside the provider.
#[derive(Default)]
pub struct GoogleSearchTool;

impl GoogleSearchTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Search the web with Google Search"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    async fn execute(&self, _ctx: Arc<ToolContext>, _args: Value) -> Result<Value> {
        Err(Error::Tool(
            "google_search is executed by the Gemini service".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_builtin() {
        let tool = GoogleSearchTool::new();
        assert!(tool.is_builtin());
        assert_eq!(tool.name(), "google_search");
    }
}
