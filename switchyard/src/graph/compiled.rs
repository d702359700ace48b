//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds nodes, the entry node and the routing
//! table derived from explicit and conditional edges.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging;
use super::node_middleware::NodeMiddleware;
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs from the first node; uses each node's returned `Next` or the conditional
/// router (when present) to choose the next node. Steps run strictly one after another.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (from START).
    pub(super) first_node_id: String,
    /// Node id -> Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) max_steps: Option<u32>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Replaces the step bound set on the builder. `None` runs until END.
    pub fn with_max_steps(mut self, max_steps: Option<u32>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn max_steps(&self) -> Option<u32> {
        self.max_steps
    }

    /// Id of the node that runs first.
    pub fn first_node_id(&self) -> &str {
        &self.first_node_id
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Runs one node by id, through the middleware when one is attached.
    ///
    /// Returns `AgentError::UnknownNode` when no node has that id.
    pub async fn run_node(&self, id: &str, state: S) -> Result<(S, Next), AgentError> {
        let node = self
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| AgentError::UnknownNode(id.to_string()))?;
        match &self.middleware {
            Some(middleware) => {
                let node_id = node.id().to_string();
                middleware
                    .around_run(
                        &node_id,
                        state,
                        Box::new(move |s| Box::pin(async move { node.run(s).await })),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }

    /// Picks the id to run after `current_id`, or `None` to stop.
    fn next_after(&self, current_id: &str, state: &S, next: Next) -> Option<String> {
        if let Some(NextEntry::Conditional(router)) = self.next_map.get(current_id) {
            let target = router.resolve_next(state);
            tracing::debug!(from = %current_id, to = %target, "conditional routing");
            return Some(target);
        }
        match next {
            Next::End => None,
            Next::Node(id) => Some(id),
            Next::Continue => match self.next_map.get(current_id) {
                Some(NextEntry::Unconditional(id)) => Some(id.clone()),
                _ => None,
            },
        }
    }

    async fn run_loop(&self, mut state: S, start_id: String) -> Result<S, AgentError> {
        logging::run_started(&start_id);
        let mut current_id = start_id;
        let mut steps: u32 = 0;

        loop {
            if let Some(limit) = self.max_steps {
                if steps >= limit {
                    return Err(AgentError::StepLimitExceeded(limit));
                }
            }
            logging::step_entered(&current_id, &state);

            let (new_state, next) = self.run_node(&current_id, state).await?;
            steps += 1;
            logging::step_finished(&current_id, &next);
            state = new_state;

            match self.next_after(&current_id, &state, next) {
                Some(id) if id != END => {
                    if !self.nodes.contains_key(&id) {
                        return Err(AgentError::UnknownNode(id));
                    }
                    current_id = id;
                }
                _ => {
                    logging::run_finished(steps);
                    return Ok(state);
                }
            }
        }
    }

    /// Runs the graph from its first node until END.
    ///
    /// - `Next::Continue`: follow the outgoing edge, or end if there is none.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    ///
    /// Nodes with conditional edges are routed by their router regardless of `Next`.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        self.invoke_from(&self.first_node_id.clone(), state).await
    }

    /// Like `invoke`, but starts at `start_id`.
    pub async fn invoke_from(&self, start_id: &str, state: S) -> Result<S, AgentError> {
        if !self.nodes.contains_key(start_id) {
            let err = AgentError::UnknownNode(start_id.to_string());
            logging::run_failed(&err);
            return Err(err);
        }
        let result = self.run_loop(state, start_id.to_string()).await;
        if let Err(e) = &result {
            logging::run_failed(e);
        }
        result
    }
}
