//! Mock LLM for tests and offline runs.
//!
//! Returns a fixed reply, a fixed set of calls on every turn, or walks a scripted
//! queue of responses. Records how often it was invoked and what it was sent.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::FunctionCall;
use crate::tool_source::ToolSpec;

/// What the mock sent back for one turn.
#[derive(Clone, Debug)]
enum Scripted {
    Reply(LlmResponse),
    Fail(String),
}

/// Mock LLM: scripted responses, no network.
///
/// - `with_reply(text)`: every turn returns `text`.
/// - `with_calls(calls)`: every turn requests `calls` (the loop never ends by itself).
/// - `scripted(responses)`: returns responses in order; the last one repeats.
/// - `failing(msg)`: every turn returns `AgentError::ExecutionFailed(msg)`.
///
/// **Interaction**: Implements `LlmClient`; used by node and agent tests and by the
/// CLI's `--mock` mode.
pub struct MockLlm {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<Message>>,
    last_tools: Mutex<Vec<String>>,
}

impl MockLlm {
    fn from_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
            last_tools: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with plain text.
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self::from_script(vec![Scripted::Reply(LlmResponse::text(content))])
    }

    /// Always requests the given calls.
    pub fn with_calls(calls: Vec<FunctionCall>) -> Self {
        Self::from_script(vec![Scripted::Reply(LlmResponse::calls(calls))])
    }

    /// Returns `responses` in order; once one is left it repeats forever.
    pub fn scripted(responses: Vec<LlmResponse>) -> Self {
        Self::from_script(responses.into_iter().map(Scripted::Reply).collect())
    }

    /// Every turn fails like an unreachable backend.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script(vec![Scripted::Fail(message.into())])
    }

    /// Number of completed `invoke` calls.
    pub fn invocations(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages sent on the most recent turn.
    pub fn last_messages(&self) -> Vec<Message> {
        self.last_messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Tool names offered on the most recent turn.
    pub fn last_tool_names(&self) -> Vec<String> {
        self.last_tools.lock().map(|t| t.clone()).unwrap_or_default()
    }

    fn next_scripted(&self) -> Scripted {
        let mut script = match self.script.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if script.len() > 1 {
            if let Some(next) = script.pop_front() {
                return next;
            }
        }
        script
            .front()
            .cloned()
            .unwrap_or_else(|| Scripted::Reply(LlmResponse::default()))
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_messages.lock() {
            *last = messages.to_vec();
        }
        if let Ok(mut last) = self.last_tools.lock() {
            *last = tools.iter().map(|t| t.name.clone()).collect();
        }
        match self.next_scripted() {
            Scripted::Reply(response) => Ok(response),
            Scripted::Fail(message) => Err(AgentError::ExecutionFailed(message)),
        }
    }
}
