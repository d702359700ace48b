//! Graph compilation error.

use thiserror::Error;

/// Error returned by `StateGraph::compile` when the node/edge set is not runnable.
///
/// Every id used in an edge (except START/END) must be registered with
/// `add_node`; there must be exactly one entry edge and at least one way to END.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// An edge references an id that was never added via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Neither an edge nor a conditional router can reach END.
    #[error("graph must have at least one path to END")]
    MissingEnd,

    /// Linear edges branch, loop or are disconnected.
    #[error("edges must form a single linear chain from START to END: {0}")]
    InvalidChain(String),

    /// A node was given both an outgoing edge and conditional edges.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A conditional path_map value is neither a node id nor END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}
