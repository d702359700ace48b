//! Routed agent: the interpreter that drives a conversation step by step.
//!
//! Holds one node per `Step`. After every step the pure `route` function picks
//! the next one; the session ends when it yields `Step::End`.

use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, Node, NodeMiddleware, StateGraph, START,
};
use crate::state::{ConversationState, Step};

use super::route;

/// Builder for [`RoutedAgent`]: register one node per step, then `build`.
pub struct RoutedAgentBuilder {
    entry: Step,
    steps: Vec<(Step, Arc<dyn Node<ConversationState>>)>,
    middleware: Option<Arc<dyn NodeMiddleware<ConversationState>>>,
    max_steps: Option<u32>,
}

impl RoutedAgentBuilder {
    /// Registers the node that runs for `step`; a second registration replaces the first.
    pub fn step(mut self, step: Step, node: Arc<dyn Node<ConversationState>>) -> Self {
        self.steps.retain(|(s, _)| *s != step);
        self.steps.push((step, node));
        self
    }

    pub fn middleware(mut self, middleware: Arc<dyn NodeMiddleware<ConversationState>>) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Step bound per `run`. `None` (the default) lets a session loop forever.
    pub fn max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn build(self) -> Result<RoutedAgent, CompilationError> {
        let compiled = to_graph(self.entry, &self.steps, self.middleware.clone(), self.max_steps)
            .compile()?;
        Ok(RoutedAgent {
            entry: self.entry,
            steps: self.steps,
            middleware: self.middleware,
            compiled,
        })
    }
}

fn to_graph(
    entry: Step,
    steps: &[(Step, Arc<dyn Node<ConversationState>>)],
    middleware: Option<Arc<dyn NodeMiddleware<ConversationState>>>,
    max_steps: Option<u32>,
) -> StateGraph<ConversationState> {
    let mut graph = StateGraph::new().with_max_steps(max_steps);
    if let Some(middleware) = middleware {
        graph = graph.with_middleware(middleware);
    }
    graph.add_edge(START, entry.as_str());
    for (step, node) in steps {
        graph.add_node(step.as_str(), node.clone());
        graph.add_conditional_edges(
            step.as_str(),
            Arc::new(|s: &ConversationState| route(s).as_str().to_string()),
            None,
        );
    }
    graph
}

/// Drives a `ConversationState` through its steps.
///
/// `advance` runs exactly the step `route` selects; `run` repeats that until the
/// route is `End`. Steps run one at a time. With no step bound (the default) a
/// model that keeps requesting calls keeps the session going indefinitely.
///
/// **Interaction**: Built by `tool_agent`, `simple_agent` and `planner_agent`,
/// or directly via `RoutedAgent::builder`.
pub struct RoutedAgent {
    entry: Step,
    steps: Vec<(Step, Arc<dyn Node<ConversationState>>)>,
    middleware: Option<Arc<dyn NodeMiddleware<ConversationState>>>,
    compiled: CompiledStateGraph<ConversationState>,
}

impl RoutedAgent {
    /// Starts a builder whose graph enters at `entry`.
    pub fn builder(entry: Step) -> RoutedAgentBuilder {
        RoutedAgentBuilder {
            entry,
            steps: Vec::new(),
            middleware: None,
            max_steps: None,
        }
    }

    pub fn max_steps(&self) -> Option<u32> {
        self.compiled.max_steps()
    }

    /// Steps with a registered node, in registration order.
    pub fn steps(&self) -> Vec<Step> {
        self.steps.iter().map(|(s, _)| *s).collect()
    }

    /// The equivalent `StateGraph`: every node's outgoing edge is the router.
    pub fn graph(&self) -> StateGraph<ConversationState> {
        to_graph(
            self.entry,
            &self.steps,
            self.middleware.clone(),
            self.compiled.max_steps(),
        )
    }

    /// Runs the single step `route(&state)` selects. At `End` the state comes back unchanged.
    ///
    /// Fails with `UnknownNode` when the selected step has no node, or with the
    /// model's error.
    pub async fn advance(&self, state: ConversationState) -> Result<ConversationState, AgentError> {
        let step = route(&state);
        if step.is_end() {
            return Ok(state);
        }
        tracing::debug!(step = %step, "advance");
        let (state, _) = self.compiled.run_node(step.as_str(), state).await?;
        Ok(state)
    }

    /// Runs steps until the route is `End` and returns the final state.
    pub async fn run(&self, state: ConversationState) -> Result<ConversationState, AgentError> {
        let step = route(&state);
        if step.is_end() {
            return Ok(state);
        }
        self.compiled.invoke_from(step.as_str(), state).await
    }

    /// Fresh session for `user_input`: returns every assistant reply of the run.
    pub async fn respond(&self, user_input: impl Into<String>) -> Result<Vec<String>, AgentError> {
        let state = self.run(ConversationState::new(user_input)).await?;
        Ok(state
            .assistant_replies()
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::routed::{FunctionNode, ModelNode, UserNode};
    use crate::llm::MockLlm;
    use crate::tools::FunctionTable;

    fn agent(llm: MockLlm) -> RoutedAgent {
        let llm = Arc::new(llm);
        RoutedAgent::builder(Step::UserIntake)
            .step(Step::UserIntake, Arc::new(UserNode::new(Step::CallModel)))
            .step(Step::CallModel, Arc::new(ModelNode::new(llm)))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn advance_runs_one_step_at_a_time() {
        let agent = agent(MockLlm::with_reply("hello"));
        let state = agent.advance(ConversationState::new("hi")).await.unwrap();
        assert_eq!(state.next, Step::CallModel);
        assert_eq!(state.messages.len(), 1);

        let state = agent.advance(state).await.unwrap();
        assert_eq!(state.next, Step::End);
        assert_eq!(state.last_assistant_reply().as_deref(), Some("hello"));

        let again = agent.advance(state.clone()).await.unwrap();
        assert_eq!(again, state);
    }

    #[tokio::test]
    async fn advance_reports_step_without_node() {
        let agent = agent(MockLlm::with_reply("x"));
        let state = ConversationState {
            next: Step::Plan,
            ..ConversationState::default()
        };
        match agent.advance(state).await {
            Err(AgentError::UnknownNode(id)) => assert_eq!(id, "plan"),
            other => panic!("expected UnknownNode(plan), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn graph_has_every_registered_step() {
        let tools = Arc::new(FunctionTable::with_builtin_tools());
        let agent = RoutedAgent::builder(Step::UserIntake)
            .step(Step::UserIntake, Arc::new(UserNode::new(Step::CallModel)))
            .step(Step::CallModel, Arc::new(ModelNode::new(Arc::new(MockLlm::with_reply("ok")))))
            .step(Step::ExecuteFunctions, Arc::new(FunctionNode::new(tools)))
            .max_steps(Some(10))
            .build()
            .unwrap();
        assert_eq!(
            agent.steps(),
            vec![Step::UserIntake, Step::CallModel, Step::ExecuteFunctions]
        );
        assert_eq!(agent.max_steps(), Some(10));
        let compiled = agent.graph().compile().unwrap();
        assert_eq!(compiled.first_node_id(), "user");
        assert!(compiled.has_node("execute_functions"));
        let out = compiled.invoke(ConversationState::new("hi")).await.unwrap();
        assert_eq!(out.assistant_replies(), vec!["ok"]);
    }
}
