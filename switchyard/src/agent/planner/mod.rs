//! Planner variant: user → plan → execute → end.
//!
//! The plan step asks the model for a step-by-step plan and keeps it in the
//! scratchpad; the execute step answers the request by following that plan.

mod execute_node;
mod plan_node;

pub use execute_node::ExecuteNode;
pub use plan_node::PlanNode;

use std::sync::Arc;

use crate::agent::prompts::PLANNER_SESSION_PROMPT;
use crate::agent::routed::{RoutedAgent, RoutedAgentBuilder, UserNode};
use crate::llm::LlmClient;
use crate::state::{ConversationState, Step};

/// Planner agent; the same client serves both model steps.
pub fn planner_agent(llm: Arc<dyn LlmClient>) -> RoutedAgentBuilder {
    RoutedAgent::builder(Step::UserIntake)
        .step(
            Step::UserIntake,
            Arc::new(UserNode::new(Step::Plan).with_session_prompt(PLANNER_SESSION_PROMPT)),
        )
        .step(Step::Plan, Arc::new(PlanNode::new(llm.clone())))
        .step(Step::Execute, Arc::new(ExecuteNode::new(llm)))
}

/// Text of the request the plan is for: the latest user message, else `user_input`.
fn current_request(state: &ConversationState) -> String {
    state
        .last_user_message()
        .map(str::to_string)
        .unwrap_or_else(|| state.user_input.clone())
}
