//! `task` subcommand: the form fields of one writing task, run through the dispatcher.

use switchyard::{Task, TaskDispatcher, TaskRequest};

use super::{RunError, RunOptions};

/// Raw form fields as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TaskArgs {
    pub task: String,
    pub topic: Option<String>,
    pub content_type: Option<String>,
    pub email_type: Option<String>,
    pub details: Option<String>,
}

impl TaskArgs {
    /// Validates the task name and fills the request; unset fields stay empty or default.
    pub fn to_request(&self) -> Result<TaskRequest, RunError> {
        let task: Task = self.task.parse()?;
        let mut request = TaskRequest::new(task)
            .with_topic(self.topic.clone().unwrap_or_default())
            .with_details(self.details.clone().unwrap_or_default());
        request.content_type = self.content_type.clone();
        request.email_type = self.email_type.clone();
        Ok(request)
    }
}

/// Runs one task; the base model comes from the environment and `--model`.
pub async fn run_task(args: &TaskArgs, opts: &RunOptions) -> Result<String, RunError> {
    let request = args.to_request()?;
    let dispatcher = TaskDispatcher::new(opts.model_config()?, opts.llm_factory());
    Ok(dispatcher.dispatch(&request).await?)
}
