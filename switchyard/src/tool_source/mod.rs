//! Tool source abstraction: list callable functions and call one by name.
//!
//! The model nodes depend on `ToolSource` instead of a concrete table:
//! `ModelNode` offers `list_tools()` to the LLM and `FunctionNode` dispatches
//! each pending call through `call_tool(name, args)`. Implementations are
//! `FunctionTable` (registered `Tool`s, see `crate::tools`) and `MockToolSource` (tests).

mod mock;

pub use mock::MockToolSource;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Function definition offered to the model: name, description and JSON Schema.
///
/// **Interaction**: Returned by `ToolSource::list_tools()`; `ChatOpenAI` turns
/// each spec into a function tool on the request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Text result of a single function call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    pub text: String,
}

impl ToolCallContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors from listing or calling functions.
///
/// **Interaction**: `FunctionNode` never propagates these; it turns them into
/// error text in the transcript.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Execution(String),
}

/// Capability set: the functions the model may request.
///
/// **Interaction**: Used by `ModelNode` (list_tools) and `FunctionNode` (call_tool).
#[async_trait]
pub trait ToolSource: Send + Sync {
    /// Functions available to the model, in a stable order.
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    /// Call a function by name with JSON arguments. Unknown names return `NotFound`.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of each ToolSourceError variant contains expected keywords.
    #[test]
    fn tool_source_error_display_all_variants() {
        let s = ToolSourceError::NotFound("x".into()).to_string();
        assert!(s.contains("not found") && s.contains('x'), "{}", s);
        let s = ToolSourceError::InvalidInput("bad".into()).to_string();
        assert!(s.contains("invalid"), "{}", s);
        let s = ToolSourceError::Execution("division by zero".into()).to_string();
        assert_eq!(s, "division by zero");
    }
}
