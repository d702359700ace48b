//! Middleware that reports node enter/exit around each node run.
//!
//! Used by the CLI in `--verbose` mode. Writes to stderr so replies on stdout
//! stay clean; also emits a `tracing` event with the elapsed time.

use async_trait::async_trait;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Instant;

use crate::error::AgentError;
use crate::graph::Next;

use super::{NodeMiddleware, NodeRunFn};

/// Logs node enter/exit; generic over state type `S`, only the node id is printed.
pub struct LoggingNodeMiddleware<S> {
    _phantom: PhantomData<S>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<(S, Next), AgentError> {
        eprintln!("[node] enter node={}", node_id);
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok((_, next)) => {
                eprintln!("[node] exit node={} next={:?}", node_id, next);
                tracing::debug!(node_id, elapsed_ms, ?next, "node exit");
            }
            Err(e) => {
                eprintln!("[node] exit node={} error={}", node_id, e);
                tracing::debug!(node_id, elapsed_ms, error = %e, "node exit with error");
            }
        }
        result
    }
}
