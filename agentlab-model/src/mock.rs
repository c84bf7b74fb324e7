use agentlab_core::{Content, Error, Llm, LlmRequest, LlmResponse, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scriptable in-memory model for tests. Responses are queued up front and
/// popped in order; every request is recorded for later inspection.
pub struct MockLlm {
    name: String,
    responses: Mutex<VecDeque<LlmResponse>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, response: LlmResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        self.with_response(LlmResponse::new(Content::new("model").with_text(text)))
    }

    /// Requests seen so far, in call order.
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, req: LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Model("mock model has no response queued".into()))
    }
}
