//! Model node: send the transcript to the LLM, record a reply or requested calls.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::{ConversationState, Step};
use crate::tool_source::ToolSource;

/// Calls the LLM with `[system instruction] + transcript` and the function specs.
///
/// - Requested calls: they become the pending list and are appended to
///   `function_calls`; no assistant text is added; marker = `ExecuteFunctions`.
/// - Plain reply: `Assistant(text)` is appended; marker = `after` (default `End`).
///
/// An LLM error is returned as-is and ends the session.
pub struct ModelNode {
    llm: Arc<dyn LlmClient>,
    tools: Option<Arc<dyn ToolSource>>,
    system_prompt: Option<String>,
    after: Step,
}

impl ModelNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            tools: None,
            system_prompt: None,
            after: Step::End,
        }
    }

    /// Functions offered to the model on every call.
    pub fn with_tools(mut self, tools: Arc<dyn ToolSource>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Instruction prepended to each request; never written to the transcript.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Step to take after a plain reply.
    pub fn with_after(mut self, after: Step) -> Self {
        self.after = after;
        self
    }
}

fn apply_model_response(
    state: ConversationState,
    response: LlmResponse,
    after: Step,
) -> ConversationState {
    let mut state = state;
    if response.requests_calls() {
        tracing::debug!(
            calls = response.tool_calls.len(),
            names = ?response.tool_calls.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "model requested function calls"
        );
        state.function_calls.extend(response.tool_calls.iter().cloned());
        state.pending_function_calls = response.tool_calls;
        state.next = Step::ExecuteFunctions;
    } else {
        state.messages.push(Message::Assistant(response.content));
        state.pending_function_calls.clear();
        state.next = after;
    }
    state
}

#[async_trait]
impl Node<ConversationState> for ModelNode {
    fn id(&self) -> &str {
        Step::CallModel.as_str()
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let specs = match &self.tools {
            Some(tools) => tools.list_tools().await.map_err(|e| {
                AgentError::ExecutionFailed(format!("listing functions failed: {}", e))
            })?,
            None => Vec::new(),
        };
        let response = match &self.system_prompt {
            Some(prompt) => {
                let mut request = Vec::with_capacity(state.messages.len() + 1);
                request.push(Message::system(prompt.clone()));
                request.extend(state.messages.iter().cloned());
                self.llm.invoke(&request, &specs).await?
            }
            None => self.llm.invoke(&state.messages, &specs).await?,
        };
        Ok((
            apply_model_response(state, response, self.after),
            Next::Continue,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::state::FunctionCall;
    use crate::tools::FunctionTable;

    #[tokio::test]
    async fn plain_reply_is_appended_and_ends() {
        let llm = Arc::new(MockLlm::with_reply("4"));
        let node = ModelNode::new(llm.clone()).with_system_prompt("sys");
        let state = ConversationState {
            messages: vec![Message::user("2+2?")],
            next: Step::CallModel,
            ..ConversationState::default()
        };
        let (state, _) = node.run(state).await.unwrap();
        assert_eq!(
            state.messages,
            vec![Message::user("2+2?"), Message::assistant("4")]
        );
        assert_eq!(state.next, Step::End);
        assert_eq!(
            llm.last_messages(),
            vec![Message::system("sys"), Message::user("2+2?")]
        );
    }

    #[tokio::test]
    async fn requested_calls_become_pending_without_text() {
        let call = FunctionCall::new("calculator", r#"{"expression":"2+2"}"#, Some("c1".into()));
        let llm = Arc::new(MockLlm::with_calls(vec![call.clone()]));
        let node =
            ModelNode::new(llm.clone()).with_tools(Arc::new(FunctionTable::with_builtin_tools()));
        let state = ConversationState {
            messages: vec![Message::user("2+2?")],
            ..ConversationState::default()
        };
        let (state, _) = node.run(state).await.unwrap();
        assert_eq!(state.messages, vec![Message::user("2+2?")]);
        assert_eq!(state.pending_function_calls, vec![call.clone()]);
        assert_eq!(state.function_calls, vec![call]);
        assert_eq!(state.next, Step::ExecuteFunctions);
        assert_eq!(llm.last_tool_names(), vec!["search_web", "calculator"]);
    }

    #[tokio::test]
    async fn llm_failure_propagates() {
        let node = ModelNode::new(Arc::new(MockLlm::failing("down")));
        let err = node.run(ConversationState::default()).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }
}
