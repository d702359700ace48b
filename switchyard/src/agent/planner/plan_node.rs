use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::prompts::{planner_request, PLANNER_SYSTEM_PROMPT};
use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ConversationState, Step};

use super::current_request;

/// Writes a plan for the current request into the scratchpad; marker = `Execute`.
///
/// The planner prompt is sent on its own; the transcript is left untouched.
pub struct PlanNode {
    llm: Arc<dyn LlmClient>,
}

impl PlanNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ConversationState> for PlanNode {
    fn id(&self) -> &str {
        Step::Plan.as_str()
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let request = [
            Message::system(PLANNER_SYSTEM_PROMPT),
            Message::user(planner_request(&current_request(&state))),
        ];
        let plan = self.llm.invoke(&request, &[]).await?;
        tracing::debug!(plan_len = plan.content.len(), "plan ready");
        let new_state = ConversationState {
            scratchpad: plan.content,
            next: Step::Execute,
            ..state
        };
        Ok((new_state, Next::Continue))
    }
}
