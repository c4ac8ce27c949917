// error.rs — Error types for the lifecycle subsystem.

use thiserror::Error;
use vine_model::ActionStatus;

/// Errors from lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// No edge exists from `from` to `to` in the transition table.
    /// Requesting the current state again is also illegal — no edge is
    /// self-accepting.
    #[error("illegal transition {from} -> {to}")]
    IllegalTransition { from: ActionStatus, to: ActionStatus },

    /// The audit sink rejected a record. Only surfaced by sinks
    /// themselves; `Lifecycle::apply` absorbs it after retrying.
    #[error("audit sink failure: {reason}")]
    AuditSink { reason: String },
}
