//! Single-node pipelines: chat, direct and echo.
//!
//! Each builder returns an uncompiled `StateGraph` (`START → node → END`) so
//! callers can attach middleware or a step bound before `compile()`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::prompts::DIRECT_SYSTEM_PROMPT;
use crate::error::AgentError;
use crate::graph::{Next, Node, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ConversationState, EchoState, Step};

/// Replies to the transcript with one model call.
///
/// With a fresh-start prompt the transcript is first replaced by
/// `[System(prompt), User(user_input)]`, so earlier turns are not sent.
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
    fresh_prompt: Option<String>,
}

impl ChatNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            fresh_prompt: None,
        }
    }

    pub fn fresh(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            fresh_prompt: Some(system_prompt.into()),
        }
    }
}

#[async_trait]
impl Node<ConversationState> for ChatNode {
    fn id(&self) -> &str {
        "respond"
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let mut state = state;
        if let Some(prompt) = &self.fresh_prompt {
            state.messages = vec![Message::system(prompt.clone())];
            if !state.user_input.is_empty() {
                state.messages.push(Message::user(state.user_input.clone()));
            }
        }
        let reply = self.llm.invoke(&state.messages, &[]).await?;
        state.messages.push(Message::Assistant(reply.content));
        state.next = Step::End;
        Ok((state, Next::End))
    }
}

/// Echo: `output = "Echo: <input>"`. No model involved.
pub struct EchoNode;

#[async_trait]
impl Node<EchoState> for EchoNode {
    fn id(&self) -> &str {
        "echo"
    }

    async fn run(&self, state: EchoState) -> Result<(EchoState, Next), AgentError> {
        let output = format!("Echo: {}", state.input);
        Ok((
            EchoState {
                input: state.input,
                output,
            },
            Next::End,
        ))
    }
}

fn single_node<S>(id: &str, node: Arc<dyn Node<S>>) -> StateGraph<S>
where
    S: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    let mut graph = StateGraph::new();
    graph
        .add_node(id, node)
        .add_edge(START, id)
        .add_edge(id, END);
    graph
}

/// `respond` over the given transcript. Start with `ConversationState::from_messages`.
pub fn chat_graph(llm: Arc<dyn LlmClient>) -> StateGraph<ConversationState> {
    single_node("respond", Arc::new(ChatNode::new(llm)))
}

/// `respond` with a fresh `[system, user]` request built from `user_input`.
pub fn direct_graph(llm: Arc<dyn LlmClient>) -> StateGraph<ConversationState> {
    single_node(
        "respond",
        Arc::new(ChatNode::fresh(llm, DIRECT_SYSTEM_PROMPT)),
    )
}

pub fn echo_graph() -> StateGraph<EchoState> {
    single_node("echo", Arc::new(EchoNode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    #[tokio::test]
    async fn echo_graph_echoes_input() {
        let graph = echo_graph().compile().unwrap();
        let out = graph.invoke(EchoState::new("ping")).await.unwrap();
        assert_eq!(out.output, "Echo: ping");
        assert_eq!(out.input, "ping");
    }

    #[tokio::test]
    async fn chat_graph_appends_reply_to_transcript() {
        let llm = Arc::new(MockLlm::with_reply("Paris"));
        let graph = chat_graph(llm.clone()).compile().unwrap();
        let state = ConversationState::from_messages(vec![Message::user("capital of France?")]);
        let out = graph.invoke(state).await.unwrap();
        assert_eq!(out.assistant_replies(), vec!["Paris"]);
        assert_eq!(llm.last_messages(), vec![Message::user("capital of France?")]);
    }

    #[tokio::test]
    async fn direct_graph_starts_fresh() {
        let llm = Arc::new(MockLlm::with_reply("done"));
        let graph = direct_graph(llm.clone()).compile().unwrap();
        let state = ConversationState {
            messages: vec![Message::user("old"), Message::assistant("old reply")],
            user_input: "write a bio".into(),
            ..ConversationState::default()
        };
        let out = graph.invoke(state).await.unwrap();
        assert_eq!(out.messages.len(), 3);
        assert_eq!(out.messages[1], Message::user("write a bio"));
        assert_eq!(out.last_assistant_reply().as_deref(), Some("done"));
        let sent = llm.last_messages();
        assert!(matches!(&sent[0], Message::System(p) if p.contains("professional content")));
    }
}
