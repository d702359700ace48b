//! State graph: nodes + edges (linear or conditional), compile and invoke.
//!
//! Stands in for the orchestration library the conversation flows are wired with:
//! `StateGraph` collects nodes and edges, `compile` validates them, and
//! `CompiledStateGraph::invoke` steps through nodes until `END`.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod logging_middleware;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging_middleware::LoggingNodeMiddleware;
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeMiddleware, NodeRunFn};
pub use state_graph::{StateGraph, END, START};
