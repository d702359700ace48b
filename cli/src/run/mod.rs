//! Run orchestration: options shared by every subcommand, and the error they return.

mod session;
mod task;

pub use session::{AgentKind, Session};
pub use task::{run_task, TaskArgs};

use std::sync::Arc;

use switchyard::{
    AgentError, ChatOpenAI, CompilationError, ConfigError, LlmClient, LlmFactory, MockLlm,
    ModelConfig, UnknownTask,
};
use thiserror::Error;

/// Failure of one CLI run or turn.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("build graph: {0}")]
    Compile(#[from] CompilationError),
    #[error("model config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Task(#[from] UnknownTask),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Flags that apply to every subcommand.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides `OPENAI_MODEL`.
    pub model: Option<String>,
    /// Overrides `OPENAI_TEMPERATURE`.
    pub temperature: Option<f32>,
    /// Print node enter/exit on stderr.
    pub verbose: bool,
    /// Step bound for routed agents; `None` is unbounded.
    pub max_steps: Option<u32>,
    /// Answer every model call with this text instead of calling OpenAI.
    pub mock_reply: Option<String>,
}

impl RunOptions {
    /// Model settings from the environment, then the flag overrides.
    pub fn model_config(&self) -> Result<ModelConfig, RunError> {
        self.model_config_over(ModelConfig::default(), |key| std::env::var(key).ok())
    }

    /// Like `model_config`, starting from `base` and reading settings through `lookup`.
    pub fn model_config_over<F>(&self, base: ModelConfig, lookup: F) -> Result<ModelConfig, RunError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = base.overlay(lookup)?;
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        Ok(config)
    }

    /// Builds a client per configuration: `MockLlm` with `--mock`, else `ChatOpenAI`.
    pub fn llm_factory(&self) -> LlmFactory {
        match &self.mock_reply {
            Some(reply) => {
                let reply = reply.clone();
                Arc::new(move |_: &ModelConfig| -> Arc<dyn LlmClient> {
                    Arc::new(MockLlm::with_reply(reply.clone()))
                })
            }
            None => Arc::new(|config: &ModelConfig| -> Arc<dyn LlmClient> {
                Arc::new(ChatOpenAI::new(config.clone()))
            }),
        }
    }
}
