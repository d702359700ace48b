//! Library side of the `switchyard` binary.
//!
//! [`Session`] builds the agent behind one subcommand and answers turns with it;
//! [`run_task`] runs a writing task. The binary only parses flags and does I/O,
//! so tests drive the same code without a terminal.

mod run;

pub use run::{run_task, AgentKind, RunError, RunOptions, Session, TaskArgs};
