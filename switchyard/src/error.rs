//! Agent execution error types.
//!
//! Returned by `Node::run`, `CompiledStateGraph::invoke` and `RoutedAgent::run`.
//! Tool failures never show up here: the function step turns them into transcript text.

use thiserror::Error;

/// Agent execution error.
///
/// The only failure a conversation step surfaces is the model call itself
/// (`ExecutionFailed`); the remaining variants come from the graph runtime.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. the LLM call failed).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A router or node named a step that is not part of the graph.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// The run exceeded the configured maximum number of steps.
    #[error("step limit exceeded: {0} steps")]
    StepLimitExceeded(u32),
}
