//! Node middleware: wrap each node run with async logic (around pattern).
//!
//! Set via `StateGraph::with_middleware`; the compiled graph calls it for every node.

use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use crate::error::AgentError;

use super::Next;

/// The wrapped node run: call it with the state to execute the node.
pub type NodeRunFn<S> = Box<
    dyn FnOnce(S) -> Pin<Box<dyn Future<Output = Result<(S, Next), AgentError>> + Send>> + Send,
>;

/// Async middleware around `Node::run`.
///
/// Implementations decide when to call `inner`; they may log, time or
/// rewrite the result.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<(S, Next), AgentError>;
}
