use crate::state::{ConversationState, Step};

/// Picks the next step: pending calls first, then the marker.
///
/// Pure; reads only `pending_function_calls` and `next`. A non-empty pending list
/// always selects `Step::ExecuteFunctions`, whatever the marker says.
pub fn route(state: &ConversationState) -> Step {
    if state.pending_function_calls.is_empty() {
        state.next
    } else {
        Step::ExecuteFunctions
    }
}
