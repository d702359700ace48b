/// What a node asks the graph to run after it.
///
/// A node wired with `add_conditional_edges` has its `Next` overridden by the
/// router, so routed steps return `Continue` and let the state decide.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Take the node's plain edge; with no edge the run ends.
    Continue,
    /// Go to the node registered under this id.
    Node(String),
    /// Finish the run with the current state.
    End,
}
