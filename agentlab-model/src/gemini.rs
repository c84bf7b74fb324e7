use crate::retry::{execute_with_retry, is_retryable_model_error, RetryConfig};
use agentlab_core::{
    Content, Error, FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, Part,
    Result, UsageMetadata,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` client.
pub struct GeminiModel {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    retry: RetryConfig,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Model(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Override the API endpoint, mainly for tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request_body(request: &LlmRequest) -> GenerateContentRequest {
        let contents = request
            .contents
            .iter()
            .filter(|c| !c.parts.is_empty())
            .map(WireContent::from_content)
            .collect();

        let mut tools = Vec::new();
        if !request.function_declarations.is_empty() {
            tools.push(json!({ "functionDeclarations": request.function_declarations }));
        }
        if request.google_search {
            tools.push(json!({ "googleSearch": {} }));
        }

        GenerateContentRequest {
            contents,
            tools,
            generation_config: request.config.clone(),
        }
    }

    async fn generate_once(&self, body: &GenerateContentRequest) -> Result<LlmResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Model(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Model(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::Model(format!(
                "Gemini API error (HTTP {}): {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Model(format!("failed to parse response: {e}")))?;
        Ok(parsed.into_llm_response())
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse> {
        let body = Self::build_request_body(&request);
        tracing::debug!(model = %self.model, contents = body.contents.len(), "calling Gemini");
        execute_with_retry(&self.retry, is_retryable_model_error, || {
            self.generate_once(&body)
        })
        .await
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerateContentConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

impl WireContent {
    fn from_content(content: &Content) -> Self {
        // The API only accepts "user" and "model" roles; function
        // responses ride along as user turns.
        let role = match content.role.as_str() {
            "function" => "user".to_string(),
            other => other.to_string(),
        };
        Self {
            role: Some(role),
            parts: content.parts.iter().map(WirePart::from_part).collect(),
        }
    }

    fn into_content(self) -> Content {
        let mut content = Content::new(self.role.unwrap_or_else(|| "model".to_string()));
        for part in self.parts {
            if let Some(p) = part.into_part() {
                content.parts.push(p);
            }
        }
        content
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

impl WirePart {
    fn from_part(part: &Part) -> Self {
        match part {
            Part::Text { text } => Self {
                text: Some(text.clone()),
                function_call: None,
                function_response: None,
            },
            Part::FunctionCall { name, args } => Self {
                text: None,
                function_call: Some(WireFunctionCall {
                    name: name.clone(),
                    args: args.clone(),
                }),
                function_response: None,
            },
            Part::FunctionResponse { name, response } => Self {
                text: None,
                function_call: None,
                function_response: Some(WireFunctionResponse {
                    name: name.clone(),
                    response: response.clone(),
                }),
            },
        }
    }

    fn into_part(self) -> Option<Part> {
        if let Some(text) = self.text {
            return Some(Part::Text { text });
        }
        if let Some(call) = self.function_call {
            return Some(Part::FunctionCall {
                name: call.name,
                args: call.args,
            });
        }
        if let Some(resp) = self.function_response {
            return Some(Part::FunctionResponse {
                name: resp.name,
                response: resp.response,
            });
        }
        None
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<WireUsageMetadata>,
}

impl GenerateContentResponse {
    fn into_llm_response(self) -> LlmResponse {
        let mut content = None;
        let mut finish_reason = None;
        if let Some(candidate) = self.candidates.into_iter().next() {
            content = candidate.content.map(WireContent::into_content);
            finish_reason = candidate.finish_reason.map(|r| match r.as_str() {
                "STOP" => FinishReason::Stop,
                "MAX_TOKENS" => FinishReason::MaxTokens,
                "SAFETY" => FinishReason::Safety,
                "RECITATION" => FinishReason::Recitation,
                _ => FinishReason::Other,
            });
        }
        LlmResponse {
            content,
            finish_reason,
            usage: self.usage_metadata.map(|u| UsageMetadata {
                prompt_token_count: u.prompt_token_count,
                candidates_token_count: u.candidates_token_count,
                total_token_count: u.total_token_count,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<WireContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireUsageMetadata {
    #[serde(default)]
    prompt_token_count: i32,
    #[serde(default)]
    candidates_token_count: i32,
    #[serde(default)]
    total_token_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_has_contents_and_tools() {
        let mut request = LlmRequest::new(
            "gemini-2.5-flash-lite",
            vec![Content::new("user").with_text("hello")],
        );
        request
            .function_declarations
            .push(json!({"name": "exit_loop", "description": "Exits the loop."}));
        request.google_search = true;

        let body = GeminiModel::build_request_body(&request);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["tools"][0]["functionDeclarations"][0]["name"], "exit_loop");
        assert_eq!(value["tools"][1]["googleSearch"], json!({}));
    }

    #[test]
    fn test_function_role_maps_to_user() {
        let mut content = Content::new("function");
        content.parts.push(Part::FunctionResponse {
            name: "exit_loop".into(),
            response: json!({}),
        });
        let request = LlmRequest::new("gemini-2.5-flash-lite", vec![content]);

        let body = GeminiModel::build_request_body(&request);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(
            value["contents"][0]["parts"][0]["functionResponse"]["name"],
            "exit_loop"
        );
    }

    #[test]
    fn test_empty_contents_skipped_and_no_tools_key() {
        let request = LlmRequest::new("gemini-2.5-flash-lite", vec![Content::new("user")]);

        let body = GeminiModel::build_request_body(&request);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"].as_array().unwrap().len(), 0);
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let raw = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "hi there"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 3, "totalTokenCount": 7}
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let response = parsed.into_llm_response();
        assert_eq!(response.content.unwrap().text(), "hi there");
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.unwrap().total_token_count, 7);
    }

    #[test]
    fn test_response_with_function_call() {
        let raw = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"functionCall": {"name": "ResearchAgent", "args": {"request": "quantum"}}}
                ]}
            }]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let content = parsed.into_llm_response().content.unwrap();
        let calls = content.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ResearchAgent");
        assert_eq!(calls[0].1["request"], "quantum");
    }
}
