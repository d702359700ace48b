//! Conversation state and function-call types.
//!
//! ConversationState holds the transcript plus per-round pending calls; the user,
//! model and function steps read and write these fields. FunctionCall and
//! FunctionResult correlate through the call id.

use serde::{Deserialize, Serialize};

use crate::message::Message;

use super::Step;

/// A single function invocation requested by the model.
///
/// **Interaction**: Written by `ModelNode` from the LLM response; read by
/// `FunctionNode` to call `ToolSource::call_tool(name, arguments)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name as listed by the tool source.
    pub name: String,
    /// Arguments as JSON text; parsed by the function step.
    pub arguments: String,
    /// Id correlating this call with its `FunctionResult`.
    pub id: Option<String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>, id: Option<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
            id,
        }
    }
}

/// Outcome of one function call: the function's text, or error text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionResult {
    pub name: String,
    pub content: String,
    pub call_id: Option<String>,
}

/// State for the routed conversation loop.
///
/// Fixed shape: every field is always present. A fresh value is created per
/// session; steps take it by value and return the replacement.
///
/// After any step either `pending_function_calls` is non-empty (the function step
/// runs next) or `next` names the following step / `End`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Transcript (System, User, Assistant, FunctionResult).
    pub messages: Vec<Message>,
    /// Text the user step appends to the transcript.
    pub user_input: String,
    /// Routing marker set by the last step.
    pub next: Step,
    /// Every call the model requested during this session.
    pub function_calls: Vec<FunctionCall>,
    /// Calls awaiting execution; cleared by the function step.
    pub pending_function_calls: Vec<FunctionCall>,
    /// Results accumulated across the session.
    pub function_results: Vec<FunctionResult>,
    /// Plan text between the plan and execute steps.
    pub scratchpad: String,
}

impl ConversationState {
    /// Starts a session at the user step with the given input.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            next: Step::UserIntake,
            ..Self::default()
        }
    }

    /// Starts from an existing transcript; routing begins at the model step.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            next: Step::CallModel,
            ..Self::default()
        }
    }

    /// All assistant reply texts, oldest first.
    pub fn assistant_replies(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Assistant(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the content of the chronologically last Assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<String> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.clone()),
            _ => None,
        })
    }

    /// Last user message, used by the plan and execute steps as the request.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::User(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
