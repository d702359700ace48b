//! Built-in function table: listing order, calculator and search_web through `ToolSource`.


use serde_json::json;
use switchyard::{FunctionTable, SearchWebTool, ToolSource, ToolSourceError};

/// **Scenario**: Built-in functions are listed in registration order with JSON schemas.
#[tokio::test]
async fn builtin_functions_are_listed_in_order() {
    let table = FunctionTable::with_builtin_tools();
    let specs = table.list_tools().await.unwrap();
    let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["search_web", "calculator"]);
    for spec in &specs {
        assert_eq!(spec.input_schema["type"], "object");
        assert!(spec.description.is_some());
    }
}

/// **Scenario**: The calculator formats integral results without decimals and reports bad input as text.
#[tokio::test]
async fn calculator_results_and_errors() {
    let table = FunctionTable::with_builtin_tools();

    let out = table
        .call_tool("calculator", json!({"expression": "(2 + 3) * 4"}))
        .await
        .unwrap();
    assert_eq!(out.text, "Result: 20");

    let out = table
        .call_tool("calculator", json!({"expression": "7 / 2"}))
        .await
        .unwrap();
    assert_eq!(out.text, "Result: 3.5");

    let out = table
        .call_tool("calculator", json!({"expression": "2 +"}))
        .await
        .unwrap();
    assert!(out.text.starts_with("Error evaluating expression:"), "{}", out.text);
}

/// **Scenario**: search_web echoes the query in its simulated results.
#[tokio::test]
async fn search_web_mentions_query() {
    let table = FunctionTable::with_builtin_tools();
    let out = table
        .call_tool("search_web", json!({"query": "sleep hygiene"}))
        .await
        .unwrap();
    assert!(out.text.starts_with("Results for: sleep hygiene"));
}

/// **Scenario**: Unknown names are NotFound; re-registering a name keeps one entry.
#[tokio::test]
async fn unknown_names_and_reregistration() {
    let table = FunctionTable::with_builtin_tools().with_tool(Box::new(SearchWebTool));
    assert_eq!(table.len(), 2);
    assert!(table.contains("search_web"));

    let err = table.call_tool("get_weather", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolSourceError::NotFound(name) if name == "get_weather"));
}
