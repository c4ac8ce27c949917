// reconcile.rs — Reconciler: change-notification batches → transitions.
//
// Batches arrive in any order, possibly duplicated, possibly stale. The
// rules:
//   - old.status == new.status: idempotent skip (duplicate delivery)
//   - legal edge: commit through Lifecycle (audit + hooks included)
//   - illegal edge: report as needing re-transition; a late stale
//     notification legitimately lands here and an external operational
//     process decides what to do — there is no retry scheduler in this
//     engine
// Each record is handled independently; continue on error.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vine_lifecycle::Lifecycle;
use vine_model::{ActionStatus, ShareAction};

/// One change notification: paired snapshots of a share action, plus
/// the transaction wrapping it (audit records are keyed by transaction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareActionChange {
    pub transaction_id: String,
    pub old: ShareAction,
    pub new: ShareAction,
}

/// A (from, to) request against one transaction, as carried on reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransitionRequest {
    pub transaction_id: String,
    pub from: ActionStatus,
    pub to: ActionStatus,
}

/// What a batch amounted to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Transitions committed this batch.
    pub applied: Vec<TransitionRequest>,
    /// Transitions the machine refused — the queryable "needs
    /// re-transition" state.
    pub needs_retransition: Vec<TransitionRequest>,
    /// Records skipped because nothing changed.
    pub skipped: usize,
}

/// Replays change notifications through the lifecycle machine.
pub struct Reconciler<'a> {
    lifecycle: &'a Lifecycle,
}

impl<'a> Reconciler<'a> {
    pub fn new(lifecycle: &'a Lifecycle) -> Self {
        Self { lifecycle }
    }

    /// Process one batch. Never fails: per-record outcomes land on the
    /// report and one record cannot block the rest.
    pub fn process(&self, changes: &[ShareActionChange]) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for change in changes {
            let (from, to) = (change.old.status, change.new.status);
            if from == to {
                report.skipped += 1;
                continue;
            }

            match self.lifecycle.apply(&change.transaction_id, from, to) {
                Ok(_) => {
                    info!(
                        transaction_id = %change.transaction_id,
                        %from,
                        %to,
                        "reconciled transition"
                    );
                    report.applied.push(TransitionRequest {
                        transaction_id: change.transaction_id.clone(),
                        from,
                        to,
                    });
                }
                Err(e) => {
                    warn!(
                        transaction_id = %change.transaction_id,
                        %from,
                        %to,
                        "needs re-transition: {}",
                        e
                    );
                    report.needs_retransition.push(TransitionRequest {
                        transaction_id: change.transaction_id.clone(),
                        from,
                        to,
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vine_lifecycle::MemorySink;

    fn action(status: ActionStatus) -> ShareAction {
        ShareAction {
            id: "sa1".to_string(),
            challenge_id: "ch1".to_string(),
            user_id: None,
            status,
            attempt_counter: 0,
        }
    }

    fn change(transaction_id: &str, from: ActionStatus, to: ActionStatus) -> ShareActionChange {
        ShareActionChange {
            transaction_id: transaction_id.to_string(),
            old: action(from),
            new: action(to),
        }
    }

    #[test]
    fn legal_change_is_applied_and_audited() {
        let lifecycle = Lifecycle::new(Box::new(MemorySink::new()));
        let reconciler = Reconciler::new(&lifecycle);

        let report = reconciler.process(&[change(
            "tx1",
            ActionStatus::Created,
            ActionStatus::Scheduled,
        )]);
        assert_eq!(report.applied.len(), 1);
        assert_eq!(report.applied[0].transaction_id, "tx1");
        assert!(report.needs_retransition.is_empty());
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn equal_statuses_skip_idempotently() {
        let lifecycle = Lifecycle::new(Box::new(MemorySink::new()));
        let reconciler = Reconciler::new(&lifecycle);

        let report = reconciler.process(&[change(
            "tx1",
            ActionStatus::Scheduled,
            ActionStatus::Scheduled,
        )]);
        assert!(report.applied.is_empty());
        assert!(report.needs_retransition.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn illegal_change_lands_in_needs_retransition() {
        let lifecycle = Lifecycle::new(Box::new(MemorySink::new()));
        let reconciler = Reconciler::new(&lifecycle);

        // A stale notification asking to leave a terminal state.
        let report = reconciler.process(&[change(
            "tx1",
            ActionStatus::Completed,
            ActionStatus::Scheduled,
        )]);
        assert!(report.applied.is_empty());
        assert_eq!(
            report.needs_retransition,
            vec![TransitionRequest {
                transaction_id: "tx1".to_string(),
                from: ActionStatus::Completed,
                to: ActionStatus::Scheduled,
            }]
        );
    }

    #[test]
    fn one_bad_record_does_not_block_the_batch() {
        let lifecycle = Lifecycle::new(Box::new(MemorySink::new()));
        let reconciler = Reconciler::new(&lifecycle);

        let report = reconciler.process(&[
            change("tx1", ActionStatus::Completed, ActionStatus::Scheduled),
            change("tx2", ActionStatus::Created, ActionStatus::Completed),
            change("tx3", ActionStatus::Created, ActionStatus::Created),
        ]);
        assert_eq!(report.applied.len(), 1);
        assert_eq!(report.applied[0].transaction_id, "tx2");
        assert_eq!(report.needs_retransition.len(), 1);
        assert_eq!(report.needs_retransition[0].transaction_id, "tx1");
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn report_serializes_for_operational_queries() {
        let lifecycle = Lifecycle::new(Box::new(MemorySink::new()));
        let reconciler = Reconciler::new(&lifecycle);

        let report = reconciler.process(&[change(
            "tx1",
            ActionStatus::Cancelled,
            ActionStatus::Completed,
        )]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("needs_retransition"));
        assert!(json.contains("\"CANCELLED\""));
    }
}
