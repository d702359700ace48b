//! Routed conversation loop: user → call_model ⇄ execute_functions → end.
//!
//! # Main types
//!
//! - **[`UserNode`]**: appends the user's input, picks the first working step.
//! - **[`ModelNode`]**: asks the LLM for a reply or for function calls.
//! - **[`FunctionNode`]**: runs pending calls; failures become transcript text.
//! - **[`route`]**: pending calls first, then the marker.
//! - **[`RoutedAgent`]**: runs steps until `route` yields `End`.
//!
//! Use [`tool_agent`] or [`simple_agent`] for the stock wiring.

mod build;
mod function_node;
mod model_node;
mod route;
mod runner;
mod user_node;

pub use build::{run_tool_agent, simple_agent, tool_agent};
pub use function_node::FunctionNode;
pub use model_node::ModelNode;
pub use route::route;
pub use runner::{RoutedAgent, RoutedAgentBuilder};
pub use user_node::UserNode;
