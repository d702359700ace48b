use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::prompts::{executor_request, EXECUTOR_SYSTEM_PROMPT};
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ConversationState, Step};

use super::current_request;

/// Follows the scratchpad plan, appends the reply, clears the scratchpad; marker = `End`.
pub struct ExecuteNode {
    llm: Arc<dyn LlmClient>,
}

impl ExecuteNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ConversationState> for ExecuteNode {
    fn id(&self) -> &str {
        Step::Execute.as_str()
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let request = [
            Message::system(EXECUTOR_SYSTEM_PROMPT),
            Message::user(executor_request(
                &current_request(&state),
                &state.scratchpad,
            )),
        ];
        let reply = self.llm.invoke(&request, &[]).await?;
        let mut state = state;
        state.messages.push(Message::Assistant(reply.content));
        state.scratchpad.clear();
        state.next = Step::End;
        Ok((state, Next::Continue))
    }
}
