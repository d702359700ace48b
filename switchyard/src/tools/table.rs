use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;
use crate::tools::{CalculatorTool, SearchWebTool};

/// Function table: name → tool, exposed to the agent as a `ToolSource`.
///
/// Keeps registration order so `list_tools` is stable across turns.
/// Registering a name twice replaces the earlier tool in place.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() {
/// use serde_json::json;
/// use switchyard::tool_source::ToolSource;
/// use switchyard::tools::FunctionTable;
///
/// let table = FunctionTable::with_builtin_tools();
/// let names: Vec<String> = table.list_tools().await.unwrap().into_iter().map(|t| t.name).collect();
/// assert_eq!(names, ["search_web", "calculator"]);
///
/// let out = table.call_tool("calculator", json!({"expression": "2+2"})).await.unwrap();
/// assert_eq!(out.text, "Result: 4");
/// # }
/// ```
///
/// # Interaction
///
/// - **Tool**: each registered tool answers one name
/// - **FunctionNode**: dispatches pending calls through `call_tool`; `NotFound`
///   becomes the unknown-function text
#[derive(Default)]
pub struct FunctionTable {
    tools: Vec<Box<dyn Tool>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `search_web` and `calculator` registered.
    pub fn with_builtin_tools() -> Self {
        let mut table = Self::new();
        table.register(Box::new(SearchWebTool));
        table.register(Box::new(CalculatorTool));
        table
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(pos) => self.tools[pos] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Builder form of `register`.
    pub fn with_tool(mut self, tool: Box<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }
}

#[async_trait]
impl ToolSource for FunctionTable {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.iter().map(|t| t.spec()).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(arguments).await
    }
}
