//! `tracing` events emitted while a compiled graph runs.
//!
//! Run boundaries go out at `info`, each step at `debug`, and the full state a
//! step receives at `trace`, since a long transcript makes that event large.

use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

pub(crate) fn run_started(entry: &str) {
    tracing::info!(entry, "run started");
}

pub(crate) fn step_entered<S: Debug>(step: &str, state: &S) {
    tracing::debug!(step, "entering step");
    tracing::trace!(step, ?state, "step input");
}

pub(crate) fn step_finished(step: &str, next: &Next) {
    tracing::debug!(step, ?next, "step finished");
}

pub(crate) fn run_finished(steps: u32) {
    tracing::info!(steps, "run finished");
}

pub(crate) fn run_failed(error: &AgentError) {
    tracing::error!(%error, "run failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_emit_without_a_subscriber_error() {
        run_started("user");
        step_entered("call_model", &vec!["hi"]);
        step_finished("call_model", &Next::Node("execute_functions".into()));
        run_finished(4);
        run_failed(&AgentError::StepLimitExceeded(4));
    }
}
