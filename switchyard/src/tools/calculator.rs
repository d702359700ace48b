//! Arithmetic calculator tool backed by `evalexpr`.
//!
//! Accepts `+ - * / % **` (or `^`), unary minus, parentheses and integer or decimal
//! literals. Integer literals are evaluated as floats, so `7 / 2` is `3.5`.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::Tool;

/// Tool name for the calculator.
pub const TOOL_CALCULATOR: &str = "calculator";

/// Longest expression handed to the evaluator, in characters.
pub const MAX_EXPRESSION_LEN: usize = 512;

/// Deepest parenthesis nesting handed to the evaluator.
pub const MAX_NESTING: usize = 32;

/// Why an expression could not be evaluated.
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,
    #[error("expression longer than {MAX_EXPRESSION_LEN} characters")]
    TooLong,
    #[error("parentheses nested deeper than {MAX_NESTING} levels")]
    TooDeep,
    #[error("{0}")]
    Eval(String),
    #[error("division by zero or overflow")]
    NotFinite,
}

impl From<evalexpr::EvalexprError> for CalcError {
    fn from(e: evalexpr::EvalexprError) -> Self {
        Self::Eval(e.to_string())
    }
}

/// Rejects input the evaluator would recurse too deeply on.
fn check_shape(expression: &str) -> Result<(), CalcError> {
    if expression.chars().count() > MAX_EXPRESSION_LEN {
        return Err(CalcError::TooLong);
    }
    let mut depth = 0usize;
    for c in expression.chars() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(CalcError::TooDeep);
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Rewrites `**` to `^` and gives bare integer literals a `.0` suffix.
fn normalize(expression: &str) -> String {
    let expression = expression.replace("**", "^");
    let mut out = String::with_capacity(expression.len() + 8);
    let mut chars = expression.chars().peekable();
    let mut prev: Option<char> = None;
    while let Some(c) = chars.next() {
        let joined = |p: char| p.is_alphanumeric() || p == '_' || p == '.';
        if c.is_ascii_digit() && !prev.is_some_and(joined) {
            out.push(c);
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                out.push(d);
                chars.next();
            }
            if !chars.peek().copied().is_some_and(joined) {
                out.push_str(".0");
            }
            prev = Some('0');
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Evaluates an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(CalcError::Empty);
    }
    check_shape(expression)?;
    let value = evalexpr::eval_number(&normalize(expression))?;
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    Ok(value)
}

/// Integral values print without a fractional part (`4`, not `4.0`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Calculator: evaluates the `expression` argument.
///
/// Evaluation problems are answered as text (`Error evaluating expression: ...`)
/// so the model can read them; only a missing argument is a tool error.
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        TOOL_CALCULATOR
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_CALCULATOR.to_string(),
            description: Some("Calculate the result of a mathematical expression.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "The mathematical expression to evaluate"
                    }
                },
                "required": ["expression"]
            }),
        }
    }

    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError> {
        let expression = args
            .get("expression")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolSourceError::InvalidInput("missing 'expression'".to_string()))?;
        let text = match evaluate(expression) {
            Ok(value) => format!("Result: {}", format_number(value)),
            Err(e) => {
                tracing::debug!(expression, error = %e, "calculator evaluation failed");
                format!("Error evaluating expression: {}", e)
            }
        };
        Ok(ToolCallContent::text(text))
    }
}
