//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S`, returns the replacement `S` and a `Next` hint (continue,
//! jump, or end). Nodes with conditional edges have their hint overridden by the router.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (state out, next step).
///
/// **Interaction**: Registered with `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke` and `CompiledStateGraph::run_node`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"call_model"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, (state out, next step).
    ///
    /// Return `Next::Continue` to follow the outgoing edge, `Next::Node(id)` to
    /// jump, or `Next::End` to stop.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
