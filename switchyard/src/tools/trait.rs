use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// A single named function the model can request.
///
/// Each tool has a unique name, a definition (description and JSON schema)
/// and the call logic. Tools are registered with `FunctionTable`, which exposes
/// them as a `ToolSource`.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use switchyard::tools::Tool;
/// use switchyard::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
///
/// struct Shout;
///
/// #[async_trait]
/// impl Tool for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "shout".to_string(),
///             description: Some("Upper-cases the text".to_string()),
///             input_schema: serde_json::json!({}),
///         }
///     }
///
///     async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
///         let text = args["text"].as_str().unwrap_or_default();
///         Ok(ToolCallContent::text(text.to_uppercase()))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a `FunctionTable`; the model requests the tool by it.
    fn name(&self) -> &str;

    /// Description and argument schema sent to the model.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with parsed JSON arguments.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for missing or mistyped arguments, `Execution` for failures
    /// while running. The function step turns either into transcript text.
    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError>;
}
