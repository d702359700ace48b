//! Task dispatcher: per-task temperature and request shape, with a recording factory.


use std::sync::{Arc, Mutex};

use switchyard::{
    AgentError, LlmClient, LlmFactory, Message, MockLlm, ModelConfig, Task, TaskDispatcher,
    TaskRequest,
};

type Seen = Arc<Mutex<Vec<(String, f32)>>>;

fn recording_factory(reply: &'static str) -> (LlmFactory, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    let factory: LlmFactory = Arc::new(move |config: &ModelConfig| -> Arc<dyn LlmClient> {
        record
            .lock()
            .unwrap()
            .push((config.model.clone(), config.temperature));
        Arc::new(MockLlm::with_reply(reply))
    });
    (factory, seen)
}

/// **Scenario**: Each task builds its model with its own temperature and keeps the base model name.
#[tokio::test]
async fn each_task_uses_its_temperature() {
    let (factory, seen) = recording_factory("draft");
    let dispatcher = TaskDispatcher::new(ModelConfig::new("gpt-4o-mini", 0.0), factory);

    for task in [Task::ContentGeneration, Task::EmailDrafting, Task::ResearchSummary] {
        let reply = dispatcher
            .dispatch(&TaskRequest::new(task).with_topic("burnout"))
            .await
            .unwrap();
        assert_eq!(reply, "draft");
    }

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            ("gpt-4o-mini".to_string(), 0.7),
            ("gpt-4o-mini".to_string(), 0.5),
            ("gpt-4o-mini".to_string(), 0.3),
        ]
    );
}

/// **Scenario**: Research requests are a fixed system prompt plus `Topic: <topic>`.
#[test]
fn research_request_shape() {
    let messages = TaskRequest::new(Task::ResearchSummary)
        .with_topic("CBT for insomnia")
        .messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].content().contains("research assistant"));
    assert_eq!(messages[1], Message::user("Topic: CBT for insomnia"));
}

/// **Scenario**: A failing model surfaces as the dispatcher's error.
#[tokio::test]
async fn dispatch_propagates_model_failure() {
    let factory: LlmFactory = Arc::new(|_: &ModelConfig| -> Arc<dyn LlmClient> {
        Arc::new(MockLlm::failing("quota exceeded"))
    });
    let dispatcher = TaskDispatcher::new(ModelConfig::default(), factory);
    let err = dispatcher
        .dispatch(&TaskRequest::new(Task::EmailDrafting).with_details("reschedule"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::ExecutionFailed(ref m) if m.contains("quota")));
}
