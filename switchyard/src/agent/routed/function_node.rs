//! Function node: run every pending call, record results, hand back to the model.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::{ConversationState, FunctionCall, FunctionResult, Step};
use crate::tool_source::{ToolSource, ToolSourceError};

/// Parses call arguments: empty → `{}`; a JSON string holding JSON is unwrapped once.
fn parse_arguments(arguments: &str) -> Result<Value, serde_json::Error> {
    if arguments.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    let raw: Value = serde_json::from_str(arguments)?;
    if let Some(inner) = raw.as_str() {
        if let Ok(nested) = serde_json::from_str::<Value>(inner) {
            return Ok(nested);
        }
    }
    Ok(raw)
}

/// Executes pending calls in order through the `ToolSource`.
///
/// Never fails: an unknown name yields `Error: unknown function '<name>'`, any
/// other problem yields `Error executing <name>: <reason>`. Every call produces
/// exactly one `FunctionResult` message and one `FunctionResult` entry.
/// Afterwards the pending list is empty and the marker is `CallModel`.
pub struct FunctionNode {
    tools: Arc<dyn ToolSource>,
}

impl FunctionNode {
    pub fn new(tools: Arc<dyn ToolSource>) -> Self {
        Self { tools }
    }

    async fn execute(&self, call: &FunctionCall) -> String {
        let args = match parse_arguments(&call.arguments) {
            Ok(args) => args,
            Err(e) => {
                tracing::warn!(function = %call.name, error = %e, "function arguments are not valid JSON");
                return format!("Error executing {}: invalid arguments: {}", call.name, e);
            }
        };
        match self.tools.call_tool(&call.name, args).await {
            Ok(content) => content.text,
            Err(ToolSourceError::NotFound(_)) => {
                tracing::warn!(function = %call.name, "unknown function requested");
                format!("Error: unknown function '{}'", call.name)
            }
            Err(e) => {
                tracing::warn!(function = %call.name, error = %e, "function call failed");
                format!("Error executing {}: {}", call.name, e)
            }
        }
    }
}

#[async_trait]
impl Node<ConversationState> for FunctionNode {
    fn id(&self) -> &str {
        Step::ExecuteFunctions.as_str()
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let mut state = state;
        let pending = std::mem::take(&mut state.pending_function_calls);
        for call in &pending {
            let content = self.execute(call).await;
            state.messages.push(Message::function_result(
                call.name.clone(),
                call.id.clone(),
                content.clone(),
            ));
            state.function_results.push(FunctionResult {
                name: call.name.clone(),
                content,
                call_id: call.id.clone(),
            });
        }
        state.next = Step::CallModel;
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool_source::MockToolSource;
    use crate::tools::FunctionTable;

    fn with_pending(calls: Vec<FunctionCall>) -> ConversationState {
        ConversationState {
            messages: vec![Message::user("q")],
            next: Step::ExecuteFunctions,
            pending_function_calls: calls,
            ..ConversationState::default()
        }
    }

    #[test]
    fn parse_arguments_handles_empty_nested_and_invalid() {
        assert_eq!(parse_arguments("").unwrap(), serde_json::json!({}));
        assert_eq!(
            parse_arguments(r#""{\"q\":1}""#).unwrap(),
            serde_json::json!({"q": 1})
        );
        assert!(parse_arguments("{not json").is_err());
    }

    #[tokio::test]
    async fn known_unknown_and_broken_calls_each_yield_one_result() {
        let node = FunctionNode::new(Arc::new(FunctionTable::with_builtin_tools()));
        let state = with_pending(vec![
            FunctionCall::new("calculator", r#"{"expression":"2+2"}"#, Some("a".into())),
            FunctionCall::new("get_weather", "{}", Some("b".into())),
            FunctionCall::new("calculator", "{oops", Some("c".into())),
            FunctionCall::new("calculator", "{}", Some("d".into())),
        ]);
        let (state, _) = node.run(state).await.unwrap();

        assert!(state.pending_function_calls.is_empty());
        assert_eq!(state.next, Step::CallModel);
        assert_eq!(state.function_results.len(), 4);
        assert_eq!(state.messages.len(), 5);

        let texts: Vec<&str> = state
            .function_results
            .iter()
            .map(|r| r.content.as_str())
            .collect();
        assert_eq!(texts[0], "Result: 4");
        assert_eq!(texts[1], "Error: unknown function 'get_weather'");
        assert!(texts[2].starts_with("Error executing calculator: invalid arguments"));
        assert_eq!(
            texts[3],
            "Error executing calculator: invalid arguments: missing 'expression'"
        );
        assert_eq!(
            state.messages[2],
            Message::function_result("get_weather", Some("b".into()), texts[1])
        );
    }

    #[tokio::test]
    async fn tool_failure_becomes_error_text() {
        let tools = MockToolSource::get_time_example().with_failure("clock unavailable");
        let node = FunctionNode::new(Arc::new(tools));
        let state = with_pending(vec![FunctionCall::new("get_time", "", None)]);
        let (state, _) = node.run(state).await.unwrap();
        assert_eq!(
            state.function_results[0].content,
            "Error executing get_time: clock unavailable"
        );
    }

    #[tokio::test]
    async fn empty_pending_only_sets_marker() {
        let node = FunctionNode::new(Arc::new(FunctionTable::new()));
        let (state, _) = node.run(with_pending(vec![])).await.unwrap();
        assert_eq!(state.messages.len(), 1);
        assert!(state.function_results.is_empty());
        assert_eq!(state.next, Step::CallModel);
    }
}
