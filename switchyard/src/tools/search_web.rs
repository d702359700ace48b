use async_trait::async_trait;
use serde_json::json;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Tool name for the simulated web search.
pub const TOOL_SEARCH_WEB: &str = "search_web";

/// Simulated web search: returns canned text mentioning the query.
///
/// No network access; stands in for a search backend so the function-calling
/// loop can be demonstrated offline.
pub struct SearchWebTool;

/// Text returned for `query`.
pub fn search_results(query: &str) -> String {
    format!(
        "Results for: {q}\n- Found information about {q}\n- Additional details: This is a simulation of web search",
        q = query
    )
}

#[async_trait]
impl Tool for SearchWebTool {
    fn name(&self) -> &str {
        TOOL_SEARCH_WEB
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_SEARCH_WEB.to_string(),
            description: Some("Search the web for information.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolSourceError::InvalidInput("missing 'query'".to_string()))?;
        tracing::debug!(query, "search_web");
        Ok(ToolCallContent::text(search_results(query)))
    }
}
