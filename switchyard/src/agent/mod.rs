//! Agent variants built on the state graph.
//!
//! - [`routed`]: the routed conversation loop with function calling
//!   ([`tool_agent`], [`simple_agent`], [`RoutedAgent`]).
//! - [`planner`]: plan-then-execute ([`planner_agent`]).
//! - [`chat`]: single-node pipelines ([`chat_graph`], [`direct_graph`], [`echo_graph`]).
//! - [`prompts`]: the fixed prompt texts.

pub mod chat;
pub mod planner;
pub mod prompts;
pub mod routed;

pub use chat::{chat_graph, direct_graph, echo_graph, ChatNode, EchoNode};
pub use planner::{planner_agent, ExecuteNode, PlanNode};
pub use routed::{
    route, run_tool_agent, simple_agent, tool_agent, FunctionNode, ModelNode, RoutedAgent,
    RoutedAgentBuilder, UserNode,
};
