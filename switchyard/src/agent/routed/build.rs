use std::sync::Arc;

use crate::agent::prompts::TOOL_AGENT_SYSTEM_PROMPT;
use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::state::Step;
use crate::tool_source::ToolSource;

use super::{FunctionNode, ModelNode, RoutedAgent, RoutedAgentBuilder, UserNode};

/// Tool-using agent: user → call_model ⇄ execute_functions → end.
///
/// The model sees the fixed tool-agent instruction and every function in `tools`.
pub fn tool_agent(llm: Arc<dyn LlmClient>, tools: Arc<dyn ToolSource>) -> RoutedAgentBuilder {
    let model = ModelNode::new(llm)
        .with_tools(tools.clone())
        .with_system_prompt(TOOL_AGENT_SYSTEM_PROMPT);
    RoutedAgent::builder(Step::UserIntake)
        .step(Step::UserIntake, Arc::new(UserNode::new(Step::CallModel)))
        .step(Step::CallModel, Arc::new(model))
        .step(Step::ExecuteFunctions, Arc::new(FunctionNode::new(tools)))
}

/// Two-step agent with no functions: user → call_model → end.
pub fn simple_agent(llm: Arc<dyn LlmClient>) -> RoutedAgentBuilder {
    RoutedAgent::builder(Step::UserIntake)
        .step(Step::UserIntake, Arc::new(UserNode::new(Step::CallModel)))
        .step(Step::CallModel, Arc::new(ModelNode::new(llm)))
}

/// One fresh tool-agent session for `user_input`; returns the assistant replies.
pub async fn run_tool_agent(
    user_input: &str,
    llm: Arc<dyn LlmClient>,
    tools: Arc<dyn ToolSource>,
) -> Result<Vec<String>, AgentError> {
    let agent = tool_agent(llm, tools)
        .build()
        .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
    agent.respond(user_input).await
}
