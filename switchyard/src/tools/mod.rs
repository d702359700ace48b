//! Callable functions for the tool-using agent.
//!
//! `Tool` is one named function; `FunctionTable` maps names to tools and
//! implements `ToolSource`. Built-ins: `search_web` (simulated) and `calculator`.

mod calculator;
mod search_web;
mod table;
mod r#trait;

pub use calculator::{evaluate, format_number, CalcError, CalculatorTool, TOOL_CALCULATOR};
pub use r#trait::Tool;
pub use search_web::{search_results, SearchWebTool, TOOL_SEARCH_WEB};
pub use table::FunctionTable;
