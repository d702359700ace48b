//! State for the echo pipeline: no model, no tools.

use serde::{Deserialize, Serialize};

/// Input text and the echoed output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EchoState {
    pub input: String,
    pub output: String,
}

impl EchoState {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: String::new(),
        }
    }
}
