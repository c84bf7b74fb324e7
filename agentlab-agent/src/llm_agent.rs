use agentlab_core::{
    inject_state, Agent, Content, Error, Event, EventStream, InvocationContext, Llm, LlmRequest,
    Part, Result, Tool, ToolContext,
};
use async_stream::stream;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Upper bound on model/tool round trips within one invocation.
const MAX_TOOL_ROUNDS: usize = 10;

/// A model-driven agent.
///
/// Each invocation renders the instruction against session state, sends the
/// conversation to the model, executes any requested tool calls, and loops
/// until the model answers with plain text. When `output_key` is set the
/// final text is written into session state under that key, where later
/// agents can pick it up through `{placeholder}` instruction templates.
pub struct LlmAgent {
    name: String,
    description: String,
    model: Arc<dyn Llm>,
    instruction: Option<String>,
    global_instruction: Option<String>,
    output_key: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for LlmAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmAgent")
            .field("name", &self.name)
            .field("model", &self.model.name())
            .field("output_key", &self.output_key)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl LlmAgent {
    pub fn builder(name: impl Into<String>) -> LlmAgentBuilder {
        LlmAgentBuilder::new(name)
    }
}

pub struct LlmAgentBuilder {
    name: String,
    description: String,
    model: Option<Arc<dyn Llm>>,
    instruction: Option<String>,
    global_instruction: Option<String>,
    output_key: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
}

impl LlmAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            model: None,
            instruction: None,
            global_instruction: None,
            output_key: None,
            tools: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    /// Instruction for this agent. May contain `{key}` placeholders
    /// resolved from session state at invocation time.
    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Instruction prepended before the agent's own instruction.
    pub fn global_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.global_instruction = Some(instruction.into());
        self
    }

    /// Session state key that receives the agent's final text response.
    pub fn output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn build(self) -> Result<LlmAgent> {
        let model = self
            .model
            .ok_or_else(|| Error::Config(format!("agent '{}' has no model", self.name)))?;
        Ok(LlmAgent {
            name: self.name,
            description: self.description,
            model,
            instruction: self.instruction,
            global_instruction: self.global_instruction,
            output_key: self.output_key,
            tools: self.tools,
        })
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let name = self.name.clone();
        let model = self.model.clone();
        let instruction = self.instruction.clone();
        let global_instruction = self.global_instruction.clone();
        let output_key = self.output_key.clone();
        let tools = self.tools.clone();

        let s = stream! {
            let session = ctx.session_arc();
            let invocation_id = ctx.invocation_id().to_string();

            // Rendered instructions lead the conversation as user turns.
            let mut contents: Vec<Content> = Vec::new();
            for template in [&global_instruction, &instruction].into_iter().flatten() {
                match inject_state(&session, template) {
                    Ok(rendered) => {
                        contents.push(Content::new("user").with_text(rendered));
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
            contents.extend(session.history());
            let user_content = ctx.user_content().clone();
            if !contents.contains(&user_content) {
                contents.push(user_content);
            }

            let declarations: Vec<serde_json::Value> = tools
                .iter()
                .filter(|t| !t.is_builtin())
                .map(|t| {
                    let mut decl = json!({
                        "name": t.name(),
                        "description": t.description(),
                    });
                    if let Some(schema) = t.parameters_schema() {
                        decl["parameters"] = schema;
                    }
                    decl
                })
                .collect();
            let google_search = tools.iter().any(|t| t.is_builtin());

            for _round in 0..MAX_TOOL_ROUNDS {
                let mut request = LlmRequest::new(model.name(), contents.clone());
                request.function_declarations = declarations.clone();
                request.google_search = google_search;

                tracing::debug!(agent = %name, turns = contents.len(), "calling model");
                let response = match model.generate(request).await {
                    Ok(response) => response,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };
                let content = response.content.unwrap_or_else(|| Content::new("model"));

                yield Ok(Event::new(&invocation_id)
                    .with_author(&name)
                    .with_content(content.clone()));

                if !content.has_function_calls() {
                    let text = content.text();
                    session.append_history(content);
                    if let Some(key) = &output_key {
                        if !text.is_empty() {
                            session.set_state_value(key, json!(text));
                            let mut event = Event::new(&invocation_id).with_author(&name);
                            event.actions.state_delta.insert(key.clone(), json!(text));
                            yield Ok(event);
                        }
                    }
                    return;
                }

                contents.push(content.clone());
                let mut terminate = false;
                let mut response_parts = Vec::new();
                let mut round_actions = agentlab_core::EventActions::default();

                for (call_name, args) in content.function_calls() {
                    let result = match tools
                        .iter()
                        .find(|t| !t.is_builtin() && t.name() == call_name)
                    {
                        Some(tool) => {
                            let tool_ctx = Arc::new(ToolContext::new(
                                ctx.clone(),
                                format!("{invocation_id}-{call_name}"),
                            ));
                            let result = match tool.execute(tool_ctx.clone(), args).await {
                                Ok(value) => value,
                                Err(e) => {
                                    tracing::warn!(agent = %name, tool = %call_name, error = %e, "tool failed");
                                    json!({ "error": e.to_string() })
                                }
                            };
                            let actions = tool_ctx.actions();
                            if actions.escalate {
                                round_actions.escalate = true;
                                terminate = true;
                            }
                            if actions.skip_summarization {
                                round_actions.skip_summarization = true;
                                terminate = true;
                            }
                            round_actions.state_delta.extend(actions.state_delta);
                            result
                        }
                        None => json!({ "error": format!("unknown tool '{call_name}'") }),
                    };
                    response_parts.push(Part::FunctionResponse {
                        name: call_name,
                        response: result,
                    });
                }

                let mut response_content = Content::new("function");
                response_content.parts = response_parts;
                for (key, value) in &round_actions.state_delta {
                    session.set_state_value(key.clone(), value.clone());
                }

                let mut event = Event::new(&invocation_id)
                    .with_author(&name)
                    .with_content(response_content.clone());
                event.actions = round_actions;
                yield Ok(event);

                if terminate {
                    return;
                }
                contents.push(response_content);
            }

            yield Err(Error::Agent(format!(
                "agent '{name}' exceeded {MAX_TOOL_ROUNDS} tool rounds"
            )));
        };
        Ok(Box::pin(s))
    }
}
