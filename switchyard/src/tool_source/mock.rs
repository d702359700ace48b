//! Mock ToolSource for tests: fixed function list and fixed call result.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Mock tool source: listed functions all answer with the same text.
///
/// Names not in the list return `ToolSourceError::NotFound`, so the function
/// step's unknown-function path can be exercised. Every call is recorded.
pub struct MockToolSource {
    tools: Vec<ToolSpec>,
    call_result: String,
    failure: Option<String>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockToolSource {
    pub fn new(tools: Vec<ToolSpec>, call_result: impl Into<String>) -> Self {
        Self {
            tools,
            call_result: call_result.into(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// One `get_time` function returning a fixed timestamp.
    pub fn get_time_example() -> Self {
        Self::new(
            vec![ToolSpec {
                name: "get_time".to_string(),
                description: Some("Get current time.".to_string()),
                input_schema: json!({ "type": "object", "properties": {} }),
            }],
            "2025-01-29 12:00:00",
        )
    }

    pub fn with_call_result(mut self, call_result: impl Into<String>) -> Self {
        self.call_result = call_result.into();
        self
    }

    /// Listed functions fail with `ToolSourceError::Execution(message)`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// (name, arguments) of every call, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((name.to_string(), arguments));
        }
        if !self.tools.iter().any(|t| t.name == name) {
            return Err(ToolSourceError::NotFound(name.to_string()));
        }
        match &self.failure {
            Some(message) => Err(ToolSourceError::Execution(message.clone())),
            None => Ok(ToolCallContent::text(self.call_result.clone())),
        }
    }
}
