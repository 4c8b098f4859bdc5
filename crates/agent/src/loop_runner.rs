//! The agent reasoning loop implementation.

use std::sync::Arc;
use ragagent_core::message::{Conversation, Message, MessageKind, ToolCall};
use ragagent_core::provider::{Provider, ProviderRequest};
use ragagent_core::tool::{ToolInvocation, ToolRegistry};
use tracing::{debug, info, warn};

/// Default cap on LLM round-trips per run.
pub const DEFAULT_MAX_ITERATIONS: u32 = 25;

/// The core agent loop that orchestrates LLM calls and tool execution.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// Sent ahead of the conversation on every request, never stored in it
    system_prompt: Option<String>,

    /// Maximum LLM calls per run
    max_iterations: u32,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            system_prompt: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        self.system_prompt = (!prompt.is_empty()).then_some(prompt);
        self
    }

    /// Set the maximum number of LLM calls per run.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the default max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Answer a single user message.
    ///
    /// Returns every message of the exchange in order, starting with the
    /// human message. The system prompt is not included.
    pub async fn run(
        &self,
        user_message: impl Into<String>,
    ) -> Result<Vec<Message>, ragagent_core::Error> {
        let mut conversation = Conversation::new();
        conversation.push(Message::human(user_message));
        self.process(&mut conversation).await?;
        Ok(conversation.into_messages())
    }

    /// Drive the conversation until the model answers without tool calls or
    /// the iteration cap is hit.
    ///
    /// Appends AI and tool messages to `conversation` and returns the final
    /// answer text (empty when the cap was reached first).
    pub async fn process(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, ragagent_core::Error> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            "Processing conversation"
        );

        let tool_definitions = self.tools.definitions();

        for iteration in 1..=self.max_iterations {
            debug!(
                conversation_id = %conversation.id,
                iteration,
                "Agent loop iteration"
            );

            let mut request = ProviderRequest::new(&self.model, self.request_messages(conversation));
            request.temperature = self.temperature;
            request.max_tokens = self.max_tokens;
            request.tools = tool_definitions.clone();

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                debug!(
                    model = %response.model,
                    tokens = usage.total_tokens,
                    "Response generated"
                );
            }

            let mut message = response.message;
            if let MessageKind::Ai { tool_calls } = &mut message.kind {
                for (position, call) in tool_calls.iter_mut().enumerate() {
                    if call.call_id().is_none() {
                        call.id = Some(call.resolved_id(position));
                    }
                }
            }

            let tool_calls = message.tool_calls().to_vec();
            if tool_calls.is_empty() {
                let answer = message.content.clone();
                conversation.push(message);
                return Ok(answer);
            }

            debug!(tool_count = tool_calls.len(), "Executing tool calls");
            // Stored with resolved ids so later requests pair each call with its result
            conversation.push(message);

            for (position, call) in tool_calls.iter().enumerate() {
                conversation.push(self.execute_call(call, position).await);
            }
        }

        warn!(
            conversation_id = %conversation.id,
            max_iterations = self.max_iterations,
            "Max tool iterations reached, returning partial transcript"
        );
        Ok(String::new())
    }

    fn request_messages(&self, conversation: &Conversation) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.messages.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt));
        }
        messages.extend(conversation.messages.iter().cloned());
        messages
    }

    /// Run one tool call. Failures are reported back to the model as the
    /// tool message content.
    async fn execute_call(&self, call: &ToolCall, position: usize) -> Message {
        let call_id = call.resolved_id(position);
        let tool_name = call.display_name().to_string();

        let invocation = ToolInvocation {
            id: call_id.clone(),
            name: tool_name.clone(),
            arguments: serde_json::Value::Object(call.args.clone()),
        };

        let start = std::time::Instant::now();
        let result = self.tools.execute(&invocation).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(tool_result) => {
                debug!(
                    tool = %tool_name,
                    documents = tool_result.artifact.as_ref().map_or(0, Vec::len),
                    duration_ms,
                    "Tool executed"
                );
                let message = Message::tool_result(call_id, tool_result.output).with_name(tool_name);
                match tool_result.artifact {
                    Some(documents) => message.with_artifact(documents),
                    None => message,
                }
            }
            Err(e) => {
                warn!(tool = %tool_name, error = %e, duration_ms, "Tool execution failed");
                Message::tool_result(call_id, format!("Error: {e}")).with_name(tool_name)
            }
        }
    }
}
