//! Task dispatcher: one-shot writing tasks for a psychology practice.
//!
//! Each task builds a fixed `[system, user]` request and calls a model created
//! for that task's temperature. No graph and no function calling.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::error::AgentError;
use crate::llm::{ChatOpenAI, LlmClient, ModelConfig};
use crate::message::Message;

pub const DEFAULT_CONTENT_TYPE: &str = "LinkedIn post";
pub const DEFAULT_EMAIL_TYPE: &str = "intake";

/// Builds a client for a given model configuration.
pub type LlmFactory = Arc<dyn Fn(&ModelConfig) -> Arc<dyn LlmClient> + Send + Sync>;

#[derive(Debug, Error, PartialEq)]
#[error("unknown task {0:?} (use 1, 2, 3, content, email or research)")]
pub struct UnknownTask(pub String);

/// The three supported tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ContentGeneration,
    EmailDrafting,
    ResearchSummary,
}

impl Task {
    /// Sampling temperature used for this task.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::ContentGeneration => 0.7,
            Self::EmailDrafting => 0.5,
            Self::ResearchSummary => 0.3,
        }
    }
}

impl FromStr for Task {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "content" | "content-generation" => Ok(Self::ContentGeneration),
            "2" | "email" | "email-drafting" => Ok(Self::EmailDrafting),
            "3" | "research" | "research-summary" => Ok(Self::ResearchSummary),
            _ => Err(UnknownTask(s.to_string())),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ContentGeneration => "content generation",
            Self::EmailDrafting => "email drafting",
            Self::ResearchSummary => "research summary",
        })
    }
}

/// Form fields for one task; unset optional fields use the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    pub task: Task,
    pub topic: String,
    pub content_type: Option<String>,
    pub email_type: Option<String>,
    pub details: String,
}

impl TaskRequest {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            topic: String::new(),
            content_type: None,
            email_type: None,
            details: String::new(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// The `[system, user]` messages sent for this request.
    pub fn messages(&self) -> Vec<Message> {
        match self.task {
            Task::ContentGeneration => {
                let content_type = self
                    .content_type
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTENT_TYPE);
                vec![
                    Message::system(format!(
                        "You are a professional content writer for psychologists. Create {} content that is engaging, credible, and tailored for mental health professionals. Be specific and use a warm, expert tone.",
                        content_type
                    )),
                    Message::user(format!("Topic: {}", self.topic)),
                ]
            }
            Task::EmailDrafting => {
                let email_type = self.email_type.as_deref().unwrap_or(DEFAULT_EMAIL_TYPE);
                vec![
                    Message::system(format!(
                        "You are an expert psychologist writing a {} email to a client. Be clear, compassionate, and professional. Use a warm, supportive tone.",
                        email_type
                    )),
                    Message::user(format!("Details: {}", self.details)),
                ]
            }
            Task::ResearchSummary => vec![
                Message::system("You are a research assistant for a psychologist. Summarize the latest research and best practices on the given topic. Be concise, evidence-based, and cite reputable sources if possible."),
                Message::user(format!("Topic: {}", self.topic)),
            ],
        }
    }
}

/// Runs `TaskRequest`s against a model built per task temperature.
pub struct TaskDispatcher {
    base: ModelConfig,
    factory: LlmFactory,
}

impl TaskDispatcher {
    /// `base` supplies the model name; the temperature is replaced per task.
    pub fn new(base: ModelConfig, factory: LlmFactory) -> Self {
        Self { base, factory }
    }

    /// Dispatcher backed by `ChatOpenAI`.
    pub fn openai(base: ModelConfig) -> Self {
        Self::new(
            base,
            Arc::new(|config: &ModelConfig| -> Arc<dyn LlmClient> {
                Arc::new(ChatOpenAI::new(config.clone()))
            }),
        )
    }

    /// Model configuration used for `task`.
    pub fn config_for(&self, task: Task) -> ModelConfig {
        self.base.clone().with_temperature(task.temperature())
    }

    /// Runs one task and returns the model's reply text.
    pub async fn dispatch(&self, request: &TaskRequest) -> Result<String, AgentError> {
        let config = self.config_for(request.task);
        tracing::info!(task = %request.task, model = %config.model, temperature = config.temperature, "dispatching task");
        let llm = (self.factory)(&config);
        let response = llm.invoke(&request.messages(), &[]).await?;
        Ok(response.content)
    }
}
