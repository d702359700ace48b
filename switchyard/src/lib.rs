//! # Switchyard
//!
//! A routed conversation loop in Rust: a shared state value moves through a
//! small set of steps, and after each step a pure router picks the next one.
//! Steps are graph nodes with a **state-in, state-out** design.
//!
//! ## The loop
//!
//! ```text
//! user ──► call_model ──(requested calls)──► execute_functions
//!              ▲                                   │
//!              └───────────────────────────────────┘
//!              │
//!              └──(plain reply)──► END
//! ```
//!
//! The router checks the pending call list first and the routing marker second
//! ([`route`]). Failed function calls become error text in the transcript; only a
//! failed model call ends a session.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`], node middleware.
//! - [`agent`]: [`RoutedAgent`], the step nodes, and the builders [`tool_agent`],
//!   [`simple_agent`], [`planner_agent`], [`chat_graph`], [`direct_graph`], [`echo_graph`].
//! - [`state`]: [`ConversationState`], [`Step`], [`FunctionCall`], [`FunctionResult`], [`EchoState`].
//! - [`llm`]: [`LlmClient`] trait, [`ModelConfig`], [`MockLlm`], [`ChatOpenAI`].
//! - [`tool_source`] / [`tools`]: [`ToolSource`], [`FunctionTable`], `search_web`, `calculator`.
//! - [`tasks`]: [`TaskDispatcher`] for one-shot writing tasks.
//! - [`message`]: [`Message`] (System / User / Assistant / FunctionResult).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use switchyard::{tool_agent, ChatOpenAI, ConversationState, FunctionTable, ModelConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(ChatOpenAI::new(ModelConfig::from_env()?));
//! let agent = tool_agent(llm, Arc::new(FunctionTable::with_builtin_tools())).build()?;
//! let state = agent.run(ConversationState::new("What is 12 * 7?")).await?;
//! for reply in state.assistant_replies() {
//!     println!("AI: {}", reply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod state;
pub mod tasks;
pub mod tool_source;
pub mod tools;

pub use agent::{
    chat_graph, direct_graph, echo_graph, planner_agent, route, run_tool_agent, simple_agent,
    tool_agent, ChatNode, EchoNode, ExecuteNode, FunctionNode, ModelNode, PlanNode, RoutedAgent,
    RoutedAgentBuilder, UserNode,
};
pub use error::AgentError;
pub use graph::{
    CompilationError, CompiledStateGraph, ConditionalRouter, LoggingNodeMiddleware, Next, Node,
    NodeMiddleware, StateGraph, END, START,
};
pub use llm::{
    parse_temperature, ChatOpenAI, ConfigError, LlmClient, LlmResponse, LlmUsage, MockLlm,
    ModelConfig, DEFAULT_MODEL,
};
pub use message::Message;
pub use state::{ConversationState, EchoState, FunctionCall, FunctionResult, Step};
pub use tasks::{LlmFactory, Task, TaskDispatcher, TaskRequest, UnknownTask};
pub use tool_source::{MockToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
pub use tools::{CalculatorTool, FunctionTable, SearchWebTool, Tool};
