//! One subcommand's agent, built once and reused for every turn of a REPL.

use std::fmt::Debug;
use std::sync::Arc;

use switchyard::{
    chat_graph, direct_graph, echo_graph, planner_agent, simple_agent, tool_agent,
    CompiledStateGraph, ConversationState, EchoState, FunctionTable, LlmClient, LlmFactory,
    LoggingNodeMiddleware, Message, ModelConfig, RoutedAgent, RoutedAgentBuilder, StateGraph,
};

use super::{RunError, RunOptions};

/// Agent variant selected by the subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// `Echo: <input>`, no model.
    Echo,
    /// One model call over the user message.
    Chat,
    /// One model call with the content-writer system prompt.
    Direct,
    /// user → call_model, no functions.
    Simple,
    /// user → plan → execute.
    Plan,
    /// user → call_model ⇄ execute_functions with the built-in functions.
    Agent,
}

impl AgentKind {
    /// Temperature used when neither `--temperature` nor `OPENAI_TEMPERATURE` is set.
    pub fn default_temperature(&self) -> f32 {
        match self {
            Self::Direct => 0.7,
            _ => 0.0,
        }
    }
}

enum Runner {
    Echo(CompiledStateGraph<EchoState>),
    Pipeline(CompiledStateGraph<ConversationState>),
    Routed(RoutedAgent),
}

/// A compiled agent plus the way a user line is fed to it.
pub struct Session {
    kind: AgentKind,
    runner: Runner,
}

fn configure<S>(graph: StateGraph<S>, opts: &RunOptions) -> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    let graph = graph.with_max_steps(opts.max_steps);
    if opts.verbose {
        graph.with_middleware(Arc::new(LoggingNodeMiddleware::<S>::default()))
    } else {
        graph
    }
}

fn configure_routed(builder: RoutedAgentBuilder, opts: &RunOptions) -> RoutedAgentBuilder {
    let builder = builder.max_steps(opts.max_steps);
    if opts.verbose {
        builder.middleware(Arc::new(LoggingNodeMiddleware::<ConversationState>::default()))
    } else {
        builder
    }
}

impl Session {
    pub fn new(kind: AgentKind, opts: &RunOptions) -> Result<Self, RunError> {
        Self::with_factory(kind, opts, opts.llm_factory())
    }

    /// Like `new`, creating the model client through `factory`.
    pub fn with_factory(
        kind: AgentKind,
        opts: &RunOptions,
        factory: LlmFactory,
    ) -> Result<Self, RunError> {
        let llm = || -> Result<Arc<dyn LlmClient>, RunError> {
            let base = ModelConfig::default().with_temperature(kind.default_temperature());
            let config = opts.model_config_over(base, |key| std::env::var(key).ok())?;
            tracing::debug!(model = %config.model, temperature = config.temperature, "model config");
            Ok(factory(&config))
        };
        let runner = match kind {
            AgentKind::Echo => Runner::Echo(configure(echo_graph(), opts).compile()?),
            AgentKind::Chat => Runner::Pipeline(configure(chat_graph(llm()?), opts).compile()?),
            AgentKind::Direct => {
                Runner::Pipeline(configure(direct_graph(llm()?), opts).compile()?)
            }
            AgentKind::Simple => {
                Runner::Routed(configure_routed(simple_agent(llm()?), opts).build()?)
            }
            AgentKind::Plan => {
                Runner::Routed(configure_routed(planner_agent(llm()?), opts).build()?)
            }
            AgentKind::Agent => {
                let tools = Arc::new(FunctionTable::with_builtin_tools());
                Runner::Routed(configure_routed(tool_agent(llm()?, tools), opts).build()?)
            }
        };
        Ok(Self { kind, runner })
    }

    /// Wraps an already built routed agent (e.g. one with a custom tool source).
    pub fn from_routed(agent: RoutedAgent) -> Self {
        Self {
            kind: AgentKind::Agent,
            runner: Runner::Routed(agent),
        }
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Runs one fresh turn for `input` and returns the replies to print, in order.
    pub async fn turn(&self, input: &str) -> Result<Vec<String>, RunError> {
        let replies = match &self.runner {
            Runner::Echo(graph) => vec![graph.invoke(EchoState::new(input)).await?.output],
            Runner::Pipeline(graph) => {
                let state = match self.kind {
                    AgentKind::Direct => ConversationState {
                        user_input: input.to_string(),
                        ..ConversationState::default()
                    },
                    _ => ConversationState::from_messages(vec![Message::user(input)]),
                };
                graph
                    .invoke(state)
                    .await?
                    .assistant_replies()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            }
            Runner::Routed(agent) => agent.respond(input).await?,
        };
        Ok(replies)
    }
}
