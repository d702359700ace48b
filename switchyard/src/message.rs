//! Transcript message types.
//!
//! Message roles: System (usually first in the list), User, Assistant, and
//! FunctionResult (output of one requested function call, correlated by call id).
//! The transcript is append-only for the length of one session.

use serde::{Deserialize, Serialize};

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model reply text.
    Assistant(String),
    /// Result (or error text) of one function call requested by the model.
    FunctionResult {
        name: String,
        call_id: Option<String>,
        content: String,
    },
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Creates a function-result message.
    pub fn function_result(
        name: impl Into<String>,
        call_id: Option<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::FunctionResult {
            name: name.into(),
            call_id,
            content: content.into(),
        }
    }

    /// Text payload regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) => s,
            Self::FunctionResult { content, .. } => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: system/user/assistant constructors produce the correct variant with content.
    #[test]
    fn message_system_user_assistant_constructors() {
        let sys = Message::system("s");
        assert!(matches!(&sys, Message::System(c) if c == "s"));
        let usr = Message::user("u");
        assert!(matches!(&usr, Message::User(c) if c == "u"));
        let ast = Message::assistant("a");
        assert!(matches!(&ast, Message::Assistant(c) if c == "a"));
    }

    #[test]
    fn function_result_keeps_name_and_call_id() {
        let m = Message::function_result("calculator", Some("call-1".into()), "Result: 4");
        match &m {
            Message::FunctionResult {
                name,
                call_id,
                content,
            } => {
                assert_eq!(name, "calculator");
                assert_eq!(call_id.as_deref(), Some("call-1"));
                assert_eq!(content, "Result: 4");
            }
            other => panic!("expected FunctionResult, got {:?}", other),
        }
        assert_eq!(m.content(), "Result: 4");
    }

    /// **Scenario**: a function result survives serde so transcripts can be dumped as JSON.
    #[test]
    fn function_result_serializes_to_json() {
        let m = Message::function_result("search_web", None, "ok");
        let json = serde_json::to_string(&m).expect("serialize");
        let back: Message = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(m, back);
    }
}
