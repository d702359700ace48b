//! State types for the routed conversation loop.
//!
//! The graph state flows through [`StateGraph`](crate::graph::StateGraph) and
//! [`RoutedAgent`](crate::agent::RoutedAgent); every step returns a new state value.
//!
//! # Main types
//!
//! - [`ConversationState`]: transcript plus pending calls, results and the routing marker.
//! - [`Step`]: the routing marker, one tag per step of the loop (or `End`).
//! - [`FunctionCall`]: one model-requested invocation, consumed by the function step.
//! - [`FunctionResult`]: outcome of one invocation (success or error text).
//!
//! # Example
//!
//! ```rust
//! use switchyard::{ConversationState, Step};
//!
//! let state = ConversationState::new("What is 2+2?");
//! assert_eq!(state.next, Step::UserIntake);
//! assert!(state.messages.is_empty());
//! ```

mod conversation_state;
mod echo_state;
mod step;

pub use conversation_state::{ConversationState, FunctionCall, FunctionResult};
pub use echo_state::EchoState;
pub use step::Step;
