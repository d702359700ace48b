//! LLM client abstraction for the model-calling nodes.
//!
//! `ModelNode`, `ChatNode` and the planner nodes depend on a callable that
//! returns assistant text or requested function calls; this module defines the
//! trait, its configuration value and two implementations.

mod config;
mod mock;
mod openai;

pub use config::{parse_temperature, ConfigError, ModelConfig, DEFAULT_MODEL};
pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::FunctionCall;
use crate::tool_source::ToolSpec;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion: assistant text or requested function calls.
///
/// **Interaction**: Returned by `LlmClient::invoke()`. A non-empty `tool_calls`
/// means the model asked for functions; `ModelNode` then ignores `content` and
/// moves the calls onto the pending list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Function calls requested in this turn; empty means a plain reply.
    pub tool_calls: Vec<FunctionCall>,
    /// Token usage for this call, when the backend reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// Plain assistant reply with no calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Reply that requests the given calls.
    pub fn calls(tool_calls: Vec<FunctionCall>) -> Self {
        Self {
            tool_calls,
            ..Self::default()
        }
    }

    pub fn requests_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// LLM client: given the transcript and the callable functions, returns assistant
/// text or requested calls.
///
/// Implementations: `MockLlm` (scripted), `ChatOpenAI` (Chat Completions API).
/// A returned error aborts the session; callers never retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn. `tools` may be empty, in which case the model cannot request calls.
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError>;
}
