use crate::{Result, types::Content};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A model provider. Implementations turn an [`LlmRequest`] into a single
/// complete [`LlmResponse`].
#[async_trait]
pub trait Llm: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, req: LlmRequest) -> Result<LlmResponse>;
}

#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub contents: Vec<Content>,
    pub config: Option<GenerateContentConfig>,
    /// Function declarations for locally executed tools, one JSON
    /// declaration per tool.
    pub function_declarations: Vec<serde_json::Value>,
    /// Enable the provider's built-in web search grounding.
    pub google_search: bool,
}

impl LlmRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            contents,
            config: None,
            function_declarations: Vec::new(),
            google_search: false,
        }
    }

    pub fn with_config(mut self, config: GenerateContentConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Generation parameters, serialized directly into the Gemini
/// `generationConfig` wire object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: Option<Content>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Option<UsageMetadata>,
}

impl LlmResponse {
    pub fn new(content: Content) -> Self {
        Self { content: Some(content), finish_reason: Some(FinishReason::Stop), usage: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub prompt_token_count: i32,
    pub candidates_token_count: i32,
    pub total_token_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req = LlmRequest::new("gemini-2.5-flash-lite", vec![]);
        assert!(req.function_declarations.is_empty());
        assert!(!req.google_search);
        assert!(req.config.is_none());
    }

    #[test]
    fn test_config_wire_names() {
        let config = GenerateContentConfig { max_output_tokens: Some(64), ..Default::default() };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["maxOutputTokens"], 64);
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_response_new() {
        let resp = LlmResponse::new(Content::new("model").with_text("hi"));
        assert_eq!(resp.finish_reason, Some(FinishReason::Stop));
        assert_eq!(resp.content.unwrap().text(), "hi");
    }
}
