// machine.rs — The transition table.
//
// An explicit static edge list instead of an FSM framework: the whole
// machine is data, checkable by eye against the lifecycle diagram.
//
//   CREATED   → SCHEDULED | ATTEMPTED | COMPLETED | CANCELLED
//   SCHEDULED → ATTEMPTED | COMPLETED | CANCELLED
//   ATTEMPTED → COMPLETED | CANCELLED
//   COMPLETED, CANCELLED: terminal
//
// No self-edges: transition(s, s) is illegal for every s.

use vine_model::ActionStatus;
use vine_model::ActionStatus::{Attempted, Cancelled, Completed, Created, Scheduled};

use crate::error::LifecycleError;

/// Every legal (from, to) edge.
const EDGES: &[(ActionStatus, ActionStatus)] = &[
    (Created, Scheduled),
    (Created, Attempted),
    (Created, Completed),
    (Created, Cancelled),
    (Scheduled, Attempted),
    (Scheduled, Completed),
    (Scheduled, Cancelled),
    (Attempted, Completed),
    (Attempted, Cancelled),
];

/// Validate an edge and return the new state.
///
/// Pure function of (current, requested); attaches no behavior to any
/// edge. Fails with [`LifecycleError::IllegalTransition`] when the edge
/// is not in the table.
pub fn transition(
    current: ActionStatus,
    requested: ActionStatus,
) -> Result<ActionStatus, LifecycleError> {
    if EDGES.contains(&(current, requested)) {
        Ok(requested)
    } else {
        Err(LifecycleError::IllegalTransition {
            from: current,
            to: requested,
        })
    }
}
