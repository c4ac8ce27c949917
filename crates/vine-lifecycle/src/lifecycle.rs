// lifecycle.rs — Lifecycle: machine + audit sink + effect hooks.
//
// apply() is the one entry point for committing a transition:
//   1. Validate the edge (pure machine).
//   2. Emit the audit record, retrying transient sink failures.
//   3. Invoke effect hooks with the record.
// The state change is authoritative the moment the edge validates; a
// sink that stays down after retries costs the audit line, not the
// transition.

use tracing::warn;
use vine_model::ActionStatus;

use crate::audit::{AuditSink, TransitionRecord};
use crate::error::LifecycleError;
use crate::hooks::EffectHook;
use crate::machine::transition;

/// How many times a failed audit write is retried before being dropped.
const AUDIT_RETRIES: usize = 3;

/// The lifecycle engine for share action status changes.
pub struct Lifecycle {
    sink: Box<dyn AuditSink>,
    hooks: Vec<Box<dyn EffectHook>>,
}

impl Lifecycle {
    pub fn new(sink: Box<dyn AuditSink>) -> Self {
        Self {
            sink,
            hooks: Vec::new(),
        }
    }

    /// Attach an effect hook. Hooks run in registration order.
    pub fn with_hook(mut self, hook: Box<dyn EffectHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Commit a transition for the share action wrapped by `transaction_id`.
    ///
    /// Returns the new status on a legal edge. The audit record is
    /// best-effort: written with bounded retry, warned about on failure,
    /// never rolled back into the result.
    pub fn apply(
        &self,
        transaction_id: &str,
        from: ActionStatus,
        to: ActionStatus,
    ) -> Result<ActionStatus, LifecycleError> {
        let next = transition(from, to)?;

        let record = TransitionRecord::new(transaction_id, from, next);
        self.write_audit(&record);

        for hook in &self.hooks {
            hook.on_transition(&record);
        }

        Ok(next)
    }

    fn write_audit(&self, record: &TransitionRecord) {
        let mut last_error = None;
        for _ in 0..AUDIT_RETRIES {
            match self.sink.record(record) {
                Ok(()) => return,
                Err(e) => last_error = Some(e),
            }
        }
        if let Some(e) = last_error {
            warn!(
                transaction_id = %record.transaction_id,
                from = %record.from,
                to = %record.to,
                "audit write dropped after {} attempts: {}",
                AUDIT_RETRIES,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::audit::MemorySink;

    #[test]
    fn apply_commits_and_audits_a_legal_edge() {
        let sink = Arc::new(MemorySink::new());
        let lifecycle = Lifecycle::new(Box::new(sink.clone()));

        let next = lifecycle
            .apply("tx1", ActionStatus::Created, ActionStatus::Completed)
            .unwrap();
        assert_eq!(next, ActionStatus::Completed);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, "tx1");
        assert_eq!(records[0].from, ActionStatus::Created);
        assert_eq!(records[0].to, ActionStatus::Completed);
    }

    #[test]
    fn apply_rejects_illegal_edge_without_auditing() {
        let sink = Arc::new(MemorySink::new());
        let lifecycle = Lifecycle::new(Box::new(sink.clone()));

        let result = lifecycle.apply("tx1", ActionStatus::Completed, ActionStatus::Scheduled);
        assert!(matches!(
            result,
            Err(LifecycleError::IllegalTransition { .. })
        ));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn flaky_sink_is_retried() {
        let sink = Arc::new(FlakySink {
            failures_left: AtomicUsize::new(2),
            recorded: Mutex::new(Vec::new()),
        });
        let lifecycle = Lifecycle::new(Box::new(sink.clone()));

        lifecycle
            .apply("tx1", ActionStatus::Created, ActionStatus::Scheduled)
            .unwrap();
        // Two failures, third attempt lands.
        assert_eq!(sink.recorded.lock().unwrap().len(), 1);
    }

    #[test]
    fn dead_sink_does_not_fail_the_transition() {
        let lifecycle = Lifecycle::new(Box::new(DeadSink));
        let next = lifecycle
            .apply("tx1", ActionStatus::Created, ActionStatus::Cancelled)
            .unwrap();
        assert_eq!(next, ActionStatus::Cancelled);
    }

    #[test]
    fn hooks_observe_the_committed_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let lifecycle = Lifecycle::new(Box::new(MemorySink::new()))
            .with_hook(Box::new(Collector(seen.clone())));

        lifecycle
            .apply("tx9", ActionStatus::Scheduled, ActionStatus::Completed)
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].transaction_id, "tx9");
    }

    // Doubles.

    struct FlakySink {
        failures_left: AtomicUsize,
        recorded: Mutex<Vec<TransitionRecord>>,
    }
    impl AuditSink for FlakySink {
        fn record(&self, record: &TransitionRecord) -> Result<(), LifecycleError> {
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(LifecycleError::AuditSink {
                    reason: "transient".to_string(),
                });
            }
            self.recorded.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct DeadSink;
    impl AuditSink for DeadSink {
        fn record(&self, _record: &TransitionRecord) -> Result<(), LifecycleError> {
            Err(LifecycleError::AuditSink {
                reason: "permanently down".to_string(),
            })
        }
    }

    struct Collector(Arc<Mutex<Vec<TransitionRecord>>>);
    impl EffectHook for Collector {
        fn on_transition(&self, record: &TransitionRecord) {
            self.0.lock().unwrap().push(record.clone());
        }
    }
}
