//! OpenAI Chat Completions client implementing `LlmClient` (async-openai).
//!
//! Uses `OPENAI_API_KEY` (and optional `OPENAI_BASE_URL`) from the environment
//! by default; `with_config` takes an explicit `OpenAIConfig`. Function results
//! are sent back as user text, so the backend never needs tool-message support.

use async_trait::async_trait;
use tracing::{debug, trace};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionToolChoiceOption, ChatCompletionTools, CreateChatCompletionRequestArgs,
        FunctionObject, ToolChoiceOptions,
    },
    Client,
};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ModelConfig};
use crate::message::Message;
use crate::state::FunctionCall;
use crate::tool_source::ToolSpec;

/// OpenAI Chat Completions client.
///
/// Model and temperature come from the `ModelConfig` given at construction.
/// Function specs passed to `invoke` are offered as tools with `tool_choice = auto`.
///
/// **Interaction**: Implements `LlmClient`; used by the model nodes and the task dispatcher.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    config: ModelConfig,
}

impl ChatOpenAI {
    /// Build client with default OpenAI config (API key from `OPENAI_API_KEY`).
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Build client with a custom OpenAI config (e.g. custom API base or key).
    pub fn with_config(openai: OpenAIConfig, config: ModelConfig) -> Self {
        Self {
            client: Client::with_config(openai),
            config,
        }
    }

    pub fn model_config(&self) -> &ModelConfig {
        &self.config
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
                Message::FunctionResult { name, content, .. } => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                        function_result_text(name, content).as_str(),
                    ))
                }
            })
            .collect()
    }

    fn tools_to_request(tools: &[ToolSpec]) -> Vec<ChatCompletionTools> {
        tools
            .iter()
            .map(|t| {
                ChatCompletionTools::Function(ChatCompletionTool {
                    function: FunctionObject {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: Some(t.input_schema.clone()),
                        ..Default::default()
                    },
                })
            })
            .collect()
    }
}

/// Text a function result is sent back to the model as.
fn function_result_text(name: &str, content: &str) -> String {
    format!("Function {} returned: {}", name, content)
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.config.model.clone());
        args.messages(Self::messages_to_request(messages));
        args.temperature(self.config.temperature);
        if !tools.is_empty() {
            args.tools(Self::tools_to_request(tools));
            args.tool_choice(ChatCompletionToolChoiceOption::Mode(ToolChoiceOptions::Auto));
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        debug!(
            trace_id = %trace_id,
            model = %self.config.model,
            temperature = self.config.temperature,
            message_count = messages.len(),
            tools_count = tools.len(),
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }

        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<FunctionCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| match tc {
                ChatCompletionMessageToolCalls::Function(f) => Some(FunctionCall {
                    name: f.function.name,
                    arguments: f.function.arguments,
                    id: Some(f.id),
                }),
                _ => None,
            })
            .collect();

        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        Ok(LlmResponse {
            content,
            tool_calls,
            usage,
        })
    }
}
