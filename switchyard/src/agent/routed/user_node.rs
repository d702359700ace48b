//! User intake node: append the user's input and reset per-turn call state.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::{ConversationState, Step};

/// Appends `User(user_input)` and hands over to the configured step.
///
/// With a session prompt, a `System` message is added first when the transcript
/// is still empty. Requested calls, pending calls, results and the scratchpad
/// start empty for the turn.
pub struct UserNode {
    session_prompt: Option<String>,
    then: Step,
}

impl UserNode {
    pub fn new(then: Step) -> Self {
        Self {
            session_prompt: None,
            then,
        }
    }

    pub fn with_session_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.session_prompt = Some(prompt.into());
        self
    }
}

#[async_trait]
impl Node<ConversationState> for UserNode {
    fn id(&self) -> &str {
        Step::UserIntake.as_str()
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let mut messages = state.messages;
        if messages.is_empty() {
            if let Some(prompt) = &self.session_prompt {
                messages.push(Message::system(prompt.clone()));
            }
        }
        messages.push(Message::user(state.user_input.clone()));
        let new_state = ConversationState {
            messages,
            user_input: state.user_input,
            next: self.then,
            function_calls: Vec::new(),
            pending_function_calls: Vec::new(),
            function_results: Vec::new(),
            scratchpad: String::new(),
        };
        Ok((new_state, Next::Continue))
    }
}
