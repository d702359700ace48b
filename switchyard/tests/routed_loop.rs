//! Routed conversation loop end to end: user → call_model ⇄ execute_functions → end.
//!
//! Uses `MockLlm` scripts and the built-in function table; no network.


use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use switchyard::{
    route, tool_agent, AgentError, ConversationState, FunctionCall, FunctionTable, LlmClient,
    LlmResponse, Message, MockLlm, MockToolSource, Step, ToolSpec,
};

fn calc(expression: &str, id: &str) -> FunctionCall {
    FunctionCall::new(
        "calculator",
        format!(r#"{{"expression":"{}"}}"#, expression),
        Some(id.to_string()),
    )
}

/// **Scenario**: The model answers directly; transcript is user then assistant, one model call.
#[tokio::test]
async fn plain_reply_ends_after_one_model_call() {
    let llm = Arc::new(MockLlm::with_reply("4"));
    let agent = tool_agent(llm.clone(), Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    let state = agent.run(ConversationState::new("What is 2+2?")).await.unwrap();

    assert_eq!(
        state.messages,
        vec![Message::user("What is 2+2?"), Message::assistant("4")]
    );
    assert_eq!(state.next, Step::End);
    assert!(state.function_calls.is_empty());
    assert_eq!(llm.invocations(), 1);
}

/// **Scenario**: A calculator argument nested 5000 levels deep comes back as error text and the loop carries on.
#[tokio::test]
async fn deeply_nested_calculator_argument_is_answered_with_error_text() {
    let nested = format!("{}1{}", "(".repeat(5000), ")".repeat(5000));
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::calls(vec![calc(&nested, "deep")]),
        LlmResponse::text("That expression is too deep."),
    ]));
    let agent = tool_agent(llm.clone(), Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    let state = agent.run(ConversationState::new("Evaluate this")).await.unwrap();

    assert_eq!(state.function_results.len(), 1);
    assert!(
        state.function_results[0]
            .content
            .starts_with("Error evaluating expression:"),
        "{}",
        state.function_results[0].content
    );
    assert_eq!(
        state.last_assistant_reply().as_deref(),
        Some("That expression is too deep.")
    );
    assert_eq!(llm.invocations(), 2);
}

/// **Scenario**: The model asks for the calculator, reads the result, then answers.
#[tokio::test]
async fn calculator_call_then_answer() {
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::calls(vec![calc("2+2", "call-1")]),
        LlmResponse::text("The answer is 4"),
    ]));
    let agent = tool_agent(llm.clone(), Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    let state = agent.run(ConversationState::new("What is 2+2?")).await.unwrap();

    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[0], Message::user("What is 2+2?"));
    match &state.messages[1] {
        Message::FunctionResult { name, call_id, content } => {
            assert_eq!(name, "calculator");
            assert_eq!(call_id.as_deref(), Some("call-1"));
            assert!(content.contains("Result: 4"), "{}", content);
        }
        other => panic!("expected function result, got {:?}", other),
    }
    assert_eq!(state.messages[2], Message::assistant("The answer is 4"));
    assert_eq!(state.function_calls.len(), 1);
    assert!(state.pending_function_calls.is_empty());
    assert_eq!(llm.invocations(), 2);

    let sent = llm.last_messages();
    assert!(matches!(&sent[0], Message::System(_)));
    assert_eq!(&sent[1..], &state.messages[..2]);
    assert_eq!(llm.last_tool_names(), vec!["search_web", "calculator"]);
}

/// **Scenario**: An unknown function becomes error text and the model is asked again.
#[tokio::test]
async fn unknown_function_is_reported_and_loop_continues() {
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::calls(vec![FunctionCall::new("get_weather", "{}", None)]),
        LlmResponse::text("I cannot check the weather."),
    ]));
    let agent = tool_agent(llm.clone(), Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    let replies = agent.respond("Weather in Oslo?").await.unwrap();

    assert_eq!(replies, vec!["I cannot check the weather."]);
    assert_eq!(llm.invocations(), 2);
    let sent = llm.last_messages();
    assert!(sent.iter().any(|m| matches!(
        m,
        Message::FunctionResult { content, .. } if content.contains("get_weather")
    )));
}

/// **Scenario**: Two identical unknown calls in one round give two independent results.
#[tokio::test]
async fn identical_unknown_calls_each_get_a_result() {
    let call = FunctionCall::new("lookup", "{}", None);
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::calls(vec![call.clone(), call]),
        LlmResponse::text("done"),
    ]));
    let agent = tool_agent(llm, Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    let state = agent.run(ConversationState::new("go")).await.unwrap();

    assert_eq!(state.function_results.len(), 2);
    for result in &state.function_results {
        assert_eq!(result.content, "Error: unknown function 'lookup'");
    }
    let results_in_transcript = state
        .messages
        .iter()
        .filter(|m| matches!(m, Message::FunctionResult { .. }))
        .count();
    assert_eq!(results_in_transcript, 2);
}

/// **Scenario**: Several calls in one round run in order through the tool source.
#[tokio::test]
async fn calls_in_one_round_run_in_order() {
    let tools = Arc::new(MockToolSource::get_time_example());
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::calls(vec![
            FunctionCall::new("get_time", "", Some("a".into())),
            FunctionCall::new("get_time", r#"{"tz":"UTC"}"#, Some("b".into())),
        ]),
        LlmResponse::text("It is noon."),
    ]));
    let agent = tool_agent(llm, tools.clone()).build().unwrap();

    let state = agent.run(ConversationState::new("time?")).await.unwrap();

    let calls = tools.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, serde_json::json!({}));
    assert_eq!(calls[1].1, serde_json::json!({"tz": "UTC"}));
    let ids: Vec<_> = state
        .function_results
        .iter()
        .map(|r| r.call_id.clone())
        .collect();
    assert_eq!(ids, vec![Some("a".to_string()), Some("b".to_string())]);
}

/// **Scenario**: A model failure aborts the session with the model's error.
#[tokio::test]
async fn model_failure_aborts_session() {
    let llm = Arc::new(MockLlm::failing("connection refused"));
    let agent = tool_agent(llm, Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    match agent.run(ConversationState::new("hi")).await {
        Err(AgentError::ExecutionFailed(msg)) => assert!(msg.contains("connection refused")),
        other => panic!("expected ExecutionFailed, got {:?}", other),
    }
}

/// Model that pauses briefly before delegating, so a timeout can interrupt the loop.
struct SlowLlm(MockLlm);

#[async_trait]
impl LlmClient for SlowLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<LlmResponse, AgentError> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        self.0.invoke(messages, tools).await
    }
}

/// **Scenario**: A model that always requests calls keeps the default (unbounded) loop running.
#[tokio::test]
async fn always_calling_model_never_finishes_without_step_bound() {
    let llm = Arc::new(SlowLlm(MockLlm::with_calls(vec![calc("1+1", "x")])));
    let agent = tool_agent(llm, Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();
    assert_eq!(agent.max_steps(), None);

    let outcome =
        tokio::time::timeout(Duration::from_millis(200), agent.run(ConversationState::new("loop")))
            .await;

    assert!(outcome.is_err(), "loop should still be running at the timeout");
}

/// **Scenario**: With a step bound the same model stops with StepLimitExceeded.
#[tokio::test]
async fn step_bound_stops_always_calling_model() {
    let llm = Arc::new(MockLlm::with_calls(vec![calc("1+1", "x")]));
    let agent = tool_agent(llm, Arc::new(FunctionTable::with_builtin_tools()))
        .max_steps(Some(7))
        .build()
        .unwrap();

    match agent.run(ConversationState::new("loop")).await {
        Err(AgentError::StepLimitExceeded(limit)) => assert_eq!(limit, 7),
        other => panic!("expected StepLimitExceeded, got {:?}", other),
    }
}

/// **Scenario**: Stepping with `advance` follows `route` one step at a time.
#[tokio::test]
async fn advance_follows_route() {
    let llm = Arc::new(MockLlm::scripted(vec![
        LlmResponse::calls(vec![calc("6*7", "c")]),
        LlmResponse::text("42"),
    ]));
    let agent = tool_agent(llm, Arc::new(FunctionTable::with_builtin_tools()))
        .build()
        .unwrap();

    let mut state = ConversationState::new("6 times 7?");
    let mut visited = Vec::new();
    while !route(&state).is_end() {
        visited.push(route(&state));
        state = agent.advance(state).await.unwrap();
    }

    assert_eq!(
        visited,
        vec![
            Step::UserIntake,
            Step::CallModel,
            Step::ExecuteFunctions,
            Step::CallModel
        ]
    );
    assert_eq!(state.function_results[0].content, "Result: 42");
    assert_eq!(state.last_assistant_reply().as_deref(), Some("42"));
}
