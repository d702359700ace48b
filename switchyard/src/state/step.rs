//! Routing marker: the fixed set of steps a conversation can be in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::END;

/// Next step of the routed loop, or `End`.
///
/// Set by every step, read only by the router. `as_str` is the node id used when
/// the loop is built as a [`StateGraph`](crate::graph::StateGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Step {
    /// Append the user's input to the transcript.
    UserIntake,
    /// Produce a step-by-step plan into the scratchpad.
    Plan,
    /// Carry out the plan and reply.
    Execute,
    /// Ask the model for a reply or for function calls.
    CallModel,
    /// Run every pending function call.
    ExecuteFunctions,
    /// Terminal: the loop is finished.
    #[default]
    End,
}

impl Step {
    /// Every non-terminal step, in the order a full run may visit them.
    pub const ALL: [Step; 5] = [
        Step::UserIntake,
        Step::Plan,
        Step::Execute,
        Step::CallModel,
        Step::ExecuteFunctions,
    ];

    /// Node id for this step.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserIntake => "user",
            Self::Plan => "plan",
            Self::Execute => "execute",
            Self::CallModel => "call_model",
            Self::ExecuteFunctions => "execute_functions",
            Self::End => END,
        }
    }

    /// Parses a node id; anything unrecognized is `End`.
    pub fn parse_or_end(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .unwrap_or(Self::End)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips_through_parse() {
        for step in Step::ALL {
            assert_eq!(Step::parse_or_end(step.as_str()), step);
        }
        assert_eq!(Step::parse_or_end(END), Step::End);
    }

    #[test]
    fn unrecognized_marker_parses_as_end() {
        assert_eq!(Step::parse_or_end("agent_node"), Step::End);
        assert_eq!(Step::parse_or_end(""), Step::End);
    }

    #[test]
    fn default_step_is_end() {
        assert!(Step::default().is_end());
    }
}
